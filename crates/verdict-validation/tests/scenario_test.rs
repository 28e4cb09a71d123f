//! End-to-end scenarios across all four validators: reference decisions,
//! determinism, caching and the no-throw guarantee.

use serde_json::json;
use verdict_core::models::{ValidationContext, ValidationDecision, ValidationResult};
use verdict_validation::{
    ContextValidator, CrossRuleValidator, DomainValidator, MorphologicalValidator, PassValidator,
};

// ─── Helper ──────────────────────────────────────────────────────────────────

fn all_validators() -> Vec<Box<dyn PassValidator>> {
    vec![
        Box::new(MorphologicalValidator::new().unwrap()),
        Box::new(ContextValidator::new().unwrap()),
        Box::new(DomainValidator::new().unwrap()),
        Box::new(CrossRuleValidator::new().unwrap()),
    ]
}

fn assert_well_formed(result: &ValidationResult) {
    assert!(matches!(
        result.decision,
        ValidationDecision::Accept | ValidationDecision::Reject | ValidationDecision::Uncertain
    ));
    assert!((0.0..=1.0).contains(&result.confidence_score), "{}", result.summary());
    for evidence in &result.evidence {
        assert!((0.0..=1.0).contains(&evidence.confidence), "{}", evidence.evidence_type);
    }
}

// ─── Reference scenarios ─────────────────────────────────────────────────────

#[test]
fn pronoun_with_clear_antecedent_is_not_rejected() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = ValidationContext::new(
        "The documentation is comprehensive. It covers all topics thoroughly.",
        35,
        "It",
    )
    .with_rule("style", "pronoun_usage");
    let result = v.validate_error(&ctx);
    assert!(
        matches!(result.decision, ValidationDecision::Accept | ValidationDecision::Uncertain),
        "{}",
        result.summary()
    );
    assert!(result.confidence_score >= 0.3);
}

#[test]
fn inline_code_short_circuits_to_reject() {
    let mut v = ContextValidator::new().unwrap();
    let text = "The config uses `max_retries` to control behavior.";
    let position = text.find("max_retries").unwrap();
    let ctx = ValidationContext::new(text, position, "max_retries").with_rule("spelling", "spell_check");
    let result = v.validate_error(&ctx);
    assert_eq!(result.decision, ValidationDecision::Reject);
    assert!(result.confidence_score >= 0.85);
    assert!(result
        .evidence_of_type("negative_context")
        .any(|e| e.data_str("signal") == Some("inline_code")));
    assert_eq!(result.metadata.get("short_circuit"), Some(&json!(true)));
    assert_eq!(v.short_circuit_count(), 1);
}

#[test]
fn technical_terminology_rule_in_fairy_tale_is_not_accepted() {
    let mut v = DomainValidator::new().unwrap();
    let ctx = ValidationContext::new(
        "The magical fairy tale features enchanted creatures in mystical forest settings.",
        30,
        "features",
    )
    .with_rule("terminology", "technical_precision");
    let result = v.validate_error(&ctx);
    assert!(
        matches!(result.decision, ValidationDecision::Reject | ValidationDecision::Uncertain),
        "{}",
        result.summary()
    );
    assert_eq!(result.metadata.get("domain"), Some(&json!("creative")));
}

#[test]
fn severe_rule_conflict_is_not_accepted() {
    let mut v = CrossRuleValidator::new().unwrap();
    let ctx = ValidationContext::new(
        "The document should be shortened but also needs comprehensive detail.",
        20,
        "shortened",
    )
    .with_rule("content", "content_reduction")
    .with_additional("all_rules", json!(["content_reduction", "information_completeness"]));
    let result = v.validate_error(&ctx);
    assert!(
        matches!(result.decision, ValidationDecision::Reject | ValidationDecision::Uncertain),
        "{}",
        result.summary()
    );
    let conflict = result.evidence_of_type("rule_conflict_detection").next().unwrap();
    assert_eq!(conflict.data_str("conflict_severity"), Some("severe"));
    assert_eq!(v.conflicts_detected(), 1);
}

#[test]
fn cross_rule_without_siblings_is_uncertain() {
    let mut v = CrossRuleValidator::new().unwrap();
    let ctx = ValidationContext::new("The cat sat on the mat.", 4, "cat").with_rule("grammar", "agreement");
    let result = v.validate_error(&ctx);
    assert_eq!(result.decision, ValidationDecision::Uncertain);
    assert!(result.evidence.is_empty());
    assert!(result.reasoning.contains("No multiple rules or errors"));
}

// ─── Determinism and caching ─────────────────────────────────────────────────

#[test]
fn repeated_validation_is_deterministic() {
    let ctx = ValidationContext::new(
        "The server restarts nightly. It clears the cache before users log in.",
        29,
        "It",
    )
    .with_rule("grammar", "pronoun_reference")
    .with_additional("all_rules", json!(["pronoun_reference", "passive_voice"]));

    for mut validator in all_validators() {
        let runs: Vec<ValidationResult> = (0..3).map(|_| validator.validate_error(&ctx)).collect();
        for run in &runs[1..] {
            assert_eq!(run.decision, runs[0].decision, "{}", validator.name());
            assert!(
                (run.confidence_score - runs[0].confidence_score).abs() < 1e-3,
                "{}",
                validator.name()
            );
        }
    }
}

#[test]
fn nlp_documents_are_cached_per_text() {
    let morphological = MorphologicalValidator::new().unwrap();
    let first = morphological.analyze_text("Caching keeps analysis cheap.").unwrap();
    let hits = morphological.cache_hits();
    let second = morphological.analyze_text("Caching keeps analysis cheap.").unwrap();
    assert!(morphological.cache_hits() > hits);
    assert_eq!(first.text, second.text);

    let context = ContextValidator::new().unwrap();
    context.analyze_text("Same words twice.").unwrap();
    context.analyze_text("Same words twice.").unwrap();
    assert_eq!(context.cache_hits(), 1);
}

#[test]
fn domain_analysis_is_cached_and_clearable() {
    let mut v = DomainValidator::new().unwrap();
    let ctx = ValidationContext::new("Deploy the API server with the new cache config.", 0, "Deploy")
        .with_rule("grammar", "imperative_mood");
    v.validate_error(&ctx);
    v.validate_error(&ctx);
    assert_eq!(v.cache_hits(), 1);
    let stats = v.get_analysis_statistics();
    assert_eq!(stats.caches["domain_analyses"].entries, 1);

    v.clear_caches();
    assert_eq!(v.get_analysis_statistics().caches["domain_analyses"].entries, 0);
}

// ─── No-throw guarantee ──────────────────────────────────────────────────────

#[test]
fn malformed_contexts_never_escape() {
    let contexts = vec![
        ValidationContext::new("", 0, ""),
        ValidationContext::new("   ", 2, "x"),
        ValidationContext::new("Short text.", 500, "missing"),
        ValidationContext::new("Short text.", 3, ""),
        ValidationContext::new("Unicode — naïve café façade.", 12, "naïve").with_rule("spelling", "accents"),
        ValidationContext::new("Rules list is not a list.", 0, "Rules")
            .with_rule("style", "wordiness")
            .with_additional("all_rules", json!(42))
            .with_additional("all_errors", json!("not a list")),
        ValidationContext::new("Mixed sibling data here.", 6, "sibling")
            .with_additional("all_rules", json!([null, 3, "conciseness", {"rule_name": "clarity"}]))
            .with_additional("all_errors", json!([1, {"position": "bad"}, {"rule_name": "clarity", "position": 2}])),
    ];

    for mut validator in all_validators() {
        for ctx in &contexts {
            let result = validator.validate_error(ctx);
            assert_well_formed(&result);
        }
        assert_eq!(validator.validation_history().len(), contexts.len());
    }
}

#[test]
fn every_validator_describes_itself() {
    for validator in all_validators() {
        let info = validator.get_validator_info();
        assert_eq!(info.name, validator.name());
        assert!(!info.capabilities.is_empty());
        assert!(info.configuration.is_object());
        let stats = validator.get_analysis_statistics();
        assert_eq!(stats.validator_name, validator.name());
        assert!(!stats.caches.is_empty());
    }
}
