use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{overrides, BaseValidatorConfig};
use crate::constants::{DEFAULT_NLP_MODEL, FALLBACK_NLP_MODEL};

/// Morphological validator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologicalConfig {
    #[serde(flatten)]
    pub base: BaseValidatorConfig,
    pub model_name: String,
    pub fallback_model_name: String,
    pub enable_dependency_parsing: bool,
    pub enable_ambiguity_detection: bool,
    pub enable_cross_verification: bool,
    /// Tokens collected on each side of the error token, within its sentence.
    pub context_window_tokens: usize,
}

impl Default for MorphologicalConfig {
    fn default() -> Self {
        Self {
            base: BaseValidatorConfig::default(),
            model_name: DEFAULT_NLP_MODEL.to_string(),
            fallback_model_name: FALLBACK_NLP_MODEL.to_string(),
            enable_dependency_parsing: true,
            enable_ambiguity_detection: true,
            enable_cross_verification: true,
            context_window_tokens: 3,
        }
    }
}

impl MorphologicalConfig {
    pub fn apply_overrides(&mut self, values: &Map<String, Value>) {
        self.base.apply_overrides(values);
        for (key, value) in values {
            match key.as_str() {
                "enable_dependency_parsing" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_dependency_parsing = v;
                    }
                }
                "enable_ambiguity_detection" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_ambiguity_detection = v;
                    }
                }
                "enable_cross_verification" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_cross_verification = v;
                    }
                }
                "context_window_tokens" => {
                    if let Some(v) = overrides::positive_usize(key, value) {
                        self.context_window_tokens = v;
                    }
                }
                _ => {}
            }
        }
    }
}
