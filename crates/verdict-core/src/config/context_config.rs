use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{overrides, BaseValidatorConfig};
use crate::constants::{DEFAULT_NLP_MODEL, FALLBACK_NLP_MODEL};

/// Context validator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    #[serde(flatten)]
    pub base: BaseValidatorConfig,
    pub model_name: String,
    pub fallback_model_name: String,
    /// Sentences considered on each side of the error sentence.
    pub context_window_size: usize,
    pub enable_coreference: bool,
    pub enable_discourse_analysis: bool,
    pub enable_semantic_consistency: bool,
    pub enable_appropriateness: bool,
    pub enable_negative_evidence: bool,
    /// Cumulative negative-evidence confidence that short-circuits to REJECT.
    pub negative_evidence_threshold: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            base: BaseValidatorConfig::default(),
            model_name: DEFAULT_NLP_MODEL.to_string(),
            fallback_model_name: FALLBACK_NLP_MODEL.to_string(),
            context_window_size: 3,
            enable_coreference: true,
            enable_discourse_analysis: true,
            enable_semantic_consistency: true,
            enable_appropriateness: true,
            enable_negative_evidence: true,
            negative_evidence_threshold: 0.85,
        }
    }
}

impl ContextConfig {
    pub fn apply_overrides(&mut self, values: &Map<String, Value>) {
        self.base.apply_overrides(values);
        for (key, value) in values {
            match key.as_str() {
                "context_window_size" => {
                    if let Some(v) = overrides::positive_usize(key, value) {
                        self.context_window_size = v;
                    }
                }
                "enable_coreference" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_coreference = v;
                    }
                }
                "enable_discourse_analysis" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_discourse_analysis = v;
                    }
                }
                "enable_semantic_consistency" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_semantic_consistency = v;
                    }
                }
                "enable_appropriateness" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_appropriateness = v;
                    }
                }
                "enable_negative_evidence" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_negative_evidence = v;
                    }
                }
                "negative_evidence_threshold" => {
                    if let Some(v) = overrides::unit_f64(key, value) {
                        self.negative_evidence_threshold = v;
                    }
                }
                _ => {}
            }
        }
    }
}
