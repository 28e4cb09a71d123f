//! Configuration system for verdict.
//! TOML-based; one section per validator plus shared base settings.
//! Runtime overrides arrive as JSON maps through `set_config`.

pub mod base_config;
pub mod context_config;
pub mod cross_rule_config;
pub mod domain_config;
pub mod morphological_config;
pub mod overrides;
pub mod verdict_config;

pub use base_config::BaseValidatorConfig;
pub use context_config::ContextConfig;
pub use cross_rule_config::CrossRuleConfig;
pub use domain_config::DomainConfig;
pub use morphological_config::MorphologicalConfig;
pub use verdict_config::VerdictConfig;
