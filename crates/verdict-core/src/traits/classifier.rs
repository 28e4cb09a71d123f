use crate::errors::VerdictResult;
use crate::models::DomainAnalysis;

/// External domain/content-type classification.
///
/// Optional: when absent or failing, the domain validator falls back to
/// its own keyword heuristic.
pub trait DomainClassifier: Send + Sync {
    fn classify(&self, text: &str) -> VerdictResult<DomainAnalysis>;
}
