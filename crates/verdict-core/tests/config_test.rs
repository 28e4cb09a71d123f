use std::io::Write;

use serde_json::json;
use verdict_core::config::{BaseValidatorConfig, ContextConfig, VerdictConfig};
use verdict_core::errors::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = VerdictConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.context.negative_evidence_threshold, 0.85);
    assert_eq!(config.context.context_window_size, 3);
    assert_eq!(config.morphological.base.max_history_size, 1000);
    assert_eq!(config.cross_rule.max_rules_per_analysis, 20);
}

#[test]
fn partial_toml_merges_over_defaults() {
    let config = VerdictConfig::from_toml(
        r#"
        [morphological]
        enable_dependency_parsing = false
        min_confidence_threshold = 0.6

        [context]
        negative_evidence_threshold = 0.9
        "#,
    )
    .unwrap();
    assert!(!config.morphological.enable_dependency_parsing);
    assert!(config.morphological.enable_ambiguity_detection);
    assert_eq!(config.morphological.base.min_confidence_threshold, 0.6);
    assert_eq!(config.context.negative_evidence_threshold, 0.9);
    assert_eq!(config.domain, Default::default());
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let err = VerdictConfig::from_toml("[context]\nnegative_evidence_threshold = 1.5\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "context.negative_evidence_threshold")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_history_is_rejected() {
    let err = VerdictConfig::from_toml("[domain]\nmax_history_size = 0\n").unwrap_err();
    assert!(err.to_string().contains("domain.max_history_size"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = VerdictConfig::from_toml("[context\nbroken").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_reads_file_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[cross_rule]\nenable_consolidation_validation = false").unwrap();
    let config = VerdictConfig::load(file.path()).unwrap();
    assert!(!config.cross_rule.enable_consolidation_validation);

    let missing = VerdictConfig::load(std::path::Path::new("/definitely/not/here.toml"));
    assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn runtime_overrides_apply_known_keys_and_keep_unknown_ones() {
    let mut base = BaseValidatorConfig::default();
    let overrides = json!({
        "min_confidence_threshold": 0.55,
        "max_history_size": 10,
        "custom_flag": true
    });
    base.apply_overrides(overrides.as_object().unwrap());
    assert_eq!(base.min_confidence_threshold, 0.55);
    assert_eq!(base.max_history_size, 10);
    assert_eq!(base.extra.get("custom_flag"), Some(&json!(true)));
}

#[test]
fn invalid_runtime_overrides_are_ignored() {
    let mut context = ContextConfig::default();
    let overrides = json!({
        "negative_evidence_threshold": "high",
        "context_window_size": 0,
        "enable_coreference": false
    });
    context.apply_overrides(overrides.as_object().unwrap());
    assert_eq!(context.negative_evidence_threshold, 0.85);
    assert_eq!(context.context_window_size, 3);
    assert!(!context.enable_coreference);
}
