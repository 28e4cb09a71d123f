//! Contracts for the collaborators a validator consumes.

pub mod classifier;
pub mod confidence;
pub mod nlp;

pub use classifier::DomainClassifier;
pub use confidence::ConfidenceCalculator;
pub use nlp::NlpAnalyzer;
