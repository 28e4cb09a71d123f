//! Value objects exchanged between callers, validators and collaborators.

pub mod confidence_breakdown;
pub mod context;
pub mod decision;
pub mod document;
pub mod domain_analysis;
pub mod evidence;
pub mod result;

pub use confidence_breakdown::ConfidenceBreakdown;
pub use context::{ErrorRecord, ValidationContext};
pub use decision::{ValidationConfidence, ValidationDecision};
pub use document::{Document, Sentence, Token};
pub use domain_analysis::{AnalysisSource, DomainAnalysis};
pub use evidence::ValidationEvidence;
pub use result::ValidationResult;
