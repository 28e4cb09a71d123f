//! Top-level configuration aggregating all validator sections.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BaseValidatorConfig, ContextConfig, CrossRuleConfig, DomainConfig, MorphologicalConfig};
use crate::errors::ConfigError;

/// Configuration for every validator, loadable from one TOML document.
///
/// ```toml
/// [morphological]
/// enable_dependency_parsing = false
///
/// [context]
/// negative_evidence_threshold = 0.9
/// ```
///
/// Missing sections and keys take their compiled defaults; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictConfig {
    pub morphological: MorphologicalConfig,
    pub context: ContextConfig,
    pub domain: DomainConfig,
    pub cross_rule: CrossRuleConfig,
}

impl VerdictConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base("morphological", &self.morphological.base)?;
        validate_base("context", &self.context.base)?;
        validate_base("domain", &self.domain.base)?;
        validate_base("cross_rule", &self.cross_rule.base)?;

        if self.morphological.context_window_tokens == 0 {
            return Err(invalid("morphological.context_window_tokens", "must be greater than 0"));
        }
        if self.context.context_window_size == 0 {
            return Err(invalid("context.context_window_size", "must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.context.negative_evidence_threshold) {
            return Err(invalid(
                "context.negative_evidence_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.domain.min_domain_confidence) {
            return Err(invalid("domain.min_domain_confidence", "must be between 0.0 and 1.0"));
        }
        if self.cross_rule.max_rules_per_analysis < 2 {
            return Err(invalid("cross_rule.max_rules_per_analysis", "must be at least 2"));
        }
        Ok(())
    }
}

fn validate_base(section: &str, base: &BaseValidatorConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&base.min_confidence_threshold) {
        return Err(invalid(
            &format!("{section}.min_confidence_threshold"),
            "must be between 0.0 and 1.0",
        ));
    }
    if base.max_history_size == 0 {
        return Err(invalid(&format!("{section}.max_history_size"), "must be greater than 0"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
