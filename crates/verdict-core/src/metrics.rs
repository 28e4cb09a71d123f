//! Per-validator performance bookkeeping.
//!
//! Grows monotonically until `reset`; never persisted.

use serde::{Deserialize, Serialize};

use crate::models::{ValidationDecision, ValidationResult};

/// Rolling counters for one validator instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationPerformanceMetrics {
    pub total_validations: u64,
    pub accept_count: u64,
    pub reject_count: u64,
    pub uncertain_count: u64,
    /// Seconds per validation, in call order.
    pub validation_times: Vec<f64>,
    /// Confidence score per validation, in call order.
    pub confidence_scores: Vec<f64>,
    /// Validations that ended in a contained failure.
    pub validation_errors: u64,
    decisions: Vec<ValidationDecision>,
}

impl ValidationPerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result into the counters.
    pub fn record(&mut self, result: &ValidationResult) {
        self.total_validations += 1;
        match result.decision {
            ValidationDecision::Accept => self.accept_count += 1,
            ValidationDecision::Reject => self.reject_count += 1,
            ValidationDecision::Uncertain => self.uncertain_count += 1,
        }
        self.validation_times.push(result.validation_time);
        self.confidence_scores.push(result.confidence_score);
        self.decisions.push(result.decision);
    }

    pub fn record_error(&mut self) {
        self.validation_errors += 1;
    }

    pub fn decision_count(&self, decision: ValidationDecision) -> u64 {
        match decision {
            ValidationDecision::Accept => self.accept_count,
            ValidationDecision::Reject => self.reject_count,
            ValidationDecision::Uncertain => self.uncertain_count,
        }
    }

    /// Fraction of validations that produced `decision`.
    pub fn decision_rate(&self, decision: ValidationDecision) -> f64 {
        if self.total_validations == 0 {
            return 0.0;
        }
        self.decision_count(decision) as f64 / self.total_validations as f64
    }

    pub fn average_time(&self) -> f64 {
        mean(&self.validation_times)
    }

    pub fn max_time(&self) -> f64 {
        self.validation_times.iter().copied().fold(0.0, f64::max)
    }

    pub fn min_time(&self) -> f64 {
        if self.validation_times.is_empty() {
            return 0.0;
        }
        self.validation_times
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    pub fn average_confidence(&self) -> f64 {
        mean(&self.confidence_scores)
    }

    /// Fraction of validations that were non-UNCERTAIN and scored at least `floor`.
    pub fn decisiveness_rate(&self, floor: f64) -> f64 {
        if self.decisions.is_empty() {
            return 0.0;
        }
        let decisive = self
            .decisions
            .iter()
            .zip(&self.confidence_scores)
            .filter(|(d, s)| **d != ValidationDecision::Uncertain && **s >= floor)
            .count();
        decisive as f64 / self.decisions.len() as f64
    }

    pub fn error_rate(&self) -> f64 {
        if self.total_validations == 0 {
            return 0.0;
        }
        self.validation_errors as f64 / self.total_validations as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationContext;

    fn result(decision: ValidationDecision, score: f64, time: f64) -> ValidationResult {
        let ctx = ValidationContext::new("t", 0, "t");
        ValidationResult::new("v", decision, score, vec![], "r", &ctx).with_validation_time(time)
    }

    #[test]
    fn empty_metrics_report_zeroes() {
        let m = ValidationPerformanceMetrics::new();
        assert_eq!(m.average_time(), 0.0);
        assert_eq!(m.average_confidence(), 0.0);
        assert_eq!(m.decision_rate(ValidationDecision::Accept), 0.0);
        assert_eq!(m.decisiveness_rate(0.7), 0.0);
        assert_eq!(m.min_time(), 0.0);
    }

    #[test]
    fn records_decisions_and_derives_rates() {
        let mut m = ValidationPerformanceMetrics::new();
        m.record(&result(ValidationDecision::Accept, 0.9, 0.002));
        m.record(&result(ValidationDecision::Reject, 0.5, 0.004));
        m.record(&result(ValidationDecision::Uncertain, 0.95, 0.006));
        m.record(&result(ValidationDecision::Accept, 0.75, 0.004));

        assert_eq!(m.total_validations, 4);
        assert_eq!(m.accept_count, 2);
        assert!((m.decision_rate(ValidationDecision::Accept) - 0.5).abs() < 1e-9);
        assert!((m.average_time() - 0.004).abs() < 1e-9);
        assert!((m.decisiveness_rate(0.7) - 0.5).abs() < 1e-9);
        assert!((m.max_time() - 0.006).abs() < 1e-9);

        m.reset();
        assert_eq!(m.total_validations, 0);
        assert!(m.confidence_scores.is_empty());
    }
}
