use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{overrides, BaseValidatorConfig};

/// Cross-rule validator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossRuleConfig {
    #[serde(flatten)]
    pub base: BaseValidatorConfig,
    pub enable_conflict_detection: bool,
    pub enable_coherence_validation: bool,
    pub enable_consolidation_validation: bool,
    pub enable_improvement_assessment: bool,
    /// Rules beyond this count are ignored by pairwise conflict detection.
    pub max_rules_per_analysis: usize,
}

impl Default for CrossRuleConfig {
    fn default() -> Self {
        Self {
            base: BaseValidatorConfig::default(),
            enable_conflict_detection: true,
            enable_coherence_validation: true,
            enable_consolidation_validation: true,
            enable_improvement_assessment: true,
            max_rules_per_analysis: 20,
        }
    }
}

impl CrossRuleConfig {
    pub fn apply_overrides(&mut self, values: &Map<String, Value>) {
        self.base.apply_overrides(values);
        for (key, value) in values {
            match key.as_str() {
                "enable_conflict_detection" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_conflict_detection = v;
                    }
                }
                "enable_coherence_validation" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_coherence_validation = v;
                    }
                }
                "enable_consolidation_validation" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_consolidation_validation = v;
                    }
                }
                "enable_improvement_assessment" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_improvement_assessment = v;
                    }
                }
                "max_rules_per_analysis" => {
                    if let Some(v) = overrides::positive_usize(key, value) {
                        self.max_rules_per_analysis = v;
                    }
                }
                _ => {}
            }
        }
    }
}
