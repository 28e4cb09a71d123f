//! # verdict-core
//!
//! Foundation crate for the verdict multi-pass validation engine.
//! Defines the evidence/decision/result data model, collaborator traits,
//! errors, configuration, the per-validator analysis cache, and
//! performance bookkeeping. Every other crate in the workspace depends on this.

pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cache::AnalysisCache;
pub use config::VerdictConfig;
pub use errors::{ValidationError, VerdictResult};
pub use metrics::ValidationPerformanceMetrics;
pub use models::{
    ConfidenceBreakdown, Document, DomainAnalysis, ErrorRecord, Sentence, Token,
    ValidationConfidence, ValidationContext, ValidationDecision, ValidationEvidence,
    ValidationResult,
};
