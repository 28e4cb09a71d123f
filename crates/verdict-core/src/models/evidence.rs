use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::confidence_breakdown::clamp_unit;
use crate::constants::ERROR_EVIDENCE_TYPE;

/// One quantified signal produced by a sub-analysis.
///
/// `confidence` is clamped into `[0, 1]` on construction. Evidence whose
/// type is `"error"` reports an internal failure and is excluded from
/// every decision weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationEvidence {
    pub evidence_type: String,
    pub confidence: f64,
    pub description: String,
    #[serde(default)]
    pub source_data: Map<String, Value>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl ValidationEvidence {
    pub fn new(
        evidence_type: impl Into<String>,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            evidence_type: evidence_type.into(),
            confidence: clamp_unit(confidence),
            description: description.into(),
            source_data: Map::new(),
            weight: default_weight(),
        }
    }

    /// Evidence describing an internal failure.
    pub fn error(error_type: &str, message: &str, error_code: &str) -> Self {
        Self::new(
            ERROR_EVIDENCE_TYPE,
            0.0,
            format!("Validation failed: {error_type}: {message}"),
        )
        .with_data("error_type", error_type)
        .with_data("error_message", message)
        .with_data("error_code", error_code)
    }

    /// Negative or NaN weights fall back to 0.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.source_data.insert(key.into(), value.into());
        self
    }

    pub fn with_source_data(mut self, data: Map<String, Value>) -> Self {
        self.source_data.extend(data);
        self
    }

    pub fn is_error(&self) -> bool {
        self.evidence_type == ERROR_EVIDENCE_TYPE
    }

    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.source_data.get(key).and_then(Value::as_str)
    }

    pub fn data_f64(&self, key: &str) -> Option<f64> {
        self.source_data.get(key).and_then(Value::as_f64)
    }

    pub fn data_bool(&self, key: &str) -> Option<bool> {
        self.source_data.get(key).and_then(Value::as_bool)
    }
}

/// `sum(confidence * weight) / sum(weight)` over non-error evidence.
///
/// Returns `None` when there is no usable evidence.
pub fn weighted_average_confidence(evidence: &[ValidationEvidence]) -> Option<f64> {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for item in evidence.iter().filter(|e| !e.is_error()) {
        weighted += item.confidence * item.weight;
        total_weight += item.weight;
    }
    if total_weight > 0.0 {
        Some(clamp_unit(weighted / total_weight))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(ValidationEvidence::new("x", 1.7, "d").confidence, 1.0);
        assert_eq!(ValidationEvidence::new("x", -0.2, "d").confidence, 0.0);
        assert_eq!(ValidationEvidence::new("x", f64::NAN, "d").confidence, 0.0);
    }

    #[test]
    fn weighted_average_skips_error_evidence() {
        let evidence = vec![
            ValidationEvidence::new("pos_tagging", 0.8, "a").with_weight(1.0),
            ValidationEvidence::new("dependency_parsing", 0.4, "b").with_weight(3.0),
            ValidationEvidence::error("AnalysisFailed", "boom", "X"),
        ];
        let avg = weighted_average_confidence(&evidence).unwrap();
        assert!((avg - 0.5).abs() < 1e-9);
    }

    #[test]
    fn weighted_average_of_nothing_is_none() {
        assert!(weighted_average_confidence(&[]).is_none());
        let only_errors = vec![ValidationEvidence::error("E", "m", "C")];
        assert!(weighted_average_confidence(&only_errors).is_none());
    }
}
