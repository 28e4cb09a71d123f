use crate::models::ConfidenceBreakdown;

/// Computes a confidence breakdown for an error that arrived without one.
pub trait ConfidenceCalculator: Send + Sync {
    fn calculate(
        &self,
        text: &str,
        error_position: usize,
        rule_type: Option<&str>,
        content_type: Option<&str>,
    ) -> ConfidenceBreakdown;
}
