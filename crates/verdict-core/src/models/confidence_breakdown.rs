use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Precomputed confidence for an error, produced by a `ConfidenceCalculator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// Final confidence in `[0, 1]`.
    pub final_confidence: f64,
    /// Prior before adjustments.
    pub base_confidence: f64,
    /// Named adjustments that were applied.
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
    #[serde(default)]
    pub explanation: String,
}

impl ConfidenceBreakdown {
    pub fn new(final_confidence: f64) -> Self {
        let value = clamp_unit(final_confidence);
        Self {
            final_confidence: value,
            base_confidence: value,
            components: BTreeMap::new(),
            explanation: String::new(),
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_bounds_and_nan() {
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(ConfidenceBreakdown::new(3.0).final_confidence, 1.0);
    }
}
