use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{overrides, BaseValidatorConfig};

/// Domain validator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    #[serde(flatten)]
    pub base: BaseValidatorConfig,
    /// Use an injected classifier when one is present.
    pub enable_domain_classification: bool,
    pub enable_terminology_validation: bool,
    pub enable_style_consistency: bool,
    pub enable_audience_validation: bool,
    /// Below this, the fallback classification reports the domain as uncertain.
    pub min_domain_confidence: f64,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            base: BaseValidatorConfig::default(),
            enable_domain_classification: true,
            enable_terminology_validation: true,
            enable_style_consistency: true,
            enable_audience_validation: true,
            min_domain_confidence: 0.6,
        }
    }
}

impl DomainConfig {
    pub fn apply_overrides(&mut self, values: &Map<String, Value>) {
        self.base.apply_overrides(values);
        for (key, value) in values {
            match key.as_str() {
                "enable_domain_classification" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_domain_classification = v;
                    }
                }
                "enable_terminology_validation" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_terminology_validation = v;
                    }
                }
                "enable_style_consistency" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_style_consistency = v;
                    }
                }
                "enable_audience_validation" => {
                    if let Some(v) = overrides::boolean(key, value) {
                        self.enable_audience_validation = v;
                    }
                }
                "min_domain_confidence" => {
                    if let Some(v) = overrides::unit_f64(key, value) {
                        self.min_domain_confidence = v;
                    }
                }
                _ => {}
            }
        }
    }
}
