use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::overrides;
use crate::constants::{DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MIN_CONFIDENCE};

/// Settings every validator understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseValidatorConfig {
    /// Floor used when judging a result decisive.
    pub min_confidence_threshold: f64,
    /// Bound of the validation-history ring buffer.
    pub max_history_size: usize,
    /// Record every result into the performance metrics.
    pub enable_performance_tracking: bool,
    /// Keys supplied at runtime that the base does not interpret.
    #[serde(skip)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for BaseValidatorConfig {
    fn default() -> Self {
        Self {
            min_confidence_threshold: DEFAULT_MIN_CONFIDENCE,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            enable_performance_tracking: true,
            extra: BTreeMap::new(),
        }
    }
}

impl BaseValidatorConfig {
    /// Apply `min_confidence_threshold`, `max_history_size` and
    /// `enable_performance_tracking`; store every other key in `extra`.
    pub fn apply_overrides(&mut self, values: &Map<String, Value>) {
        for (key, value) in values {
            match key.as_str() {
                "min_confidence_threshold" => {
                    if let Some(v) = overrides::unit_f64(key, value) {
                        self.min_confidence_threshold = v;
                    }
                }
                "max_history_size" => {
                    if let Some(v) = overrides::positive_usize(key, value) {
                        self.max_history_size = v;
                    }
                }
                "enable_performance_tracking" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_performance_tracking = v;
                    }
                }
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}
