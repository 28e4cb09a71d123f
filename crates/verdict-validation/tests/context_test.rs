//! ContextValidator: negative-evidence short-circuit, discourse evidence and
//! configuration toggles.

use serde_json::{json, Map, Value};
use verdict_core::models::{ValidationContext, ValidationDecision, ValidationResult};
use verdict_validation::{ContextValidator, PassValidator};

// ─── Helper ──────────────────────────────────────────────────────────────────

fn at(text: &str, needle: &str) -> ValidationContext {
    let byte = text.find(needle).unwrap();
    ValidationContext::new(text, text[..byte].chars().count(), needle)
}

fn signals(result: &ValidationResult) -> Vec<&str> {
    result
        .evidence_of_type("negative_context")
        .filter_map(|e| e.data_str("signal"))
        .collect()
}

fn overrides(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// ─── Negative evidence ───────────────────────────────────────────────────────

#[test]
fn quoted_span_is_rejected_before_nlp() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = at("The reviewer wrote \"teh\" in the margin.", "teh").with_rule("spelling", "misspelling");
    let result = v.validate_error(&ctx);
    assert_eq!(result.decision, ValidationDecision::Reject);
    assert!(signals(&result).contains(&"quoted"));
    assert_eq!(result.metadata.get("short_circuit"), Some(&json!(true)));
    assert_eq!(v.get_analysis_statistics().caches["nlp_documents"].misses, 0);
}

#[test]
fn single_quotes_after_possessive_are_rejected() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = at("The users' guide calls it 'utilize' everywhere.", "utilize").with_rule("style", "word_choice");
    let result = v.validate_error(&ctx);
    assert_eq!(result.decision, ValidationDecision::Reject);
    assert_eq!(signals(&result), vec!["quoted"]);
    assert_eq!(result.metadata.get("short_circuit"), Some(&json!(true)));
}

#[test]
fn fenced_code_is_rejected() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = at("Run this:\n```\nlet recieve = 1;\n```\nThen continue.", "recieve").with_rule("spelling", "misspelling");
    let result = v.validate_error(&ctx);
    assert_eq!(result.decision, ValidationDecision::Reject);
    assert!(signals(&result).contains(&"code_fence"));
}

#[test]
fn lone_legacy_marker_does_not_short_circuit() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = at("The deprecated method uses colour spelling throughout.", "colour").with_rule("spelling", "us_spelling");
    let result = v.validate_error(&ctx);
    assert_eq!(signals(&result), vec!["legacy_marker"]);
    assert_eq!(result.metadata.get("short_circuit"), Some(&json!(false)));
    assert_eq!(v.short_circuit_count(), 0);
}

#[test]
fn raised_threshold_lets_quoted_spans_through() {
    let mut v = ContextValidator::new().unwrap();
    v.set_config(&overrides(json!({ "negative_evidence_threshold": 1.0 })));
    let ctx = at("The reviewer wrote \"teh\" in the margin.", "teh").with_rule("spelling", "misspelling");
    let result = v.validate_error(&ctx);
    assert_eq!(result.metadata.get("short_circuit"), Some(&json!(false)));
    assert!(signals(&result).contains(&"quoted"));
    assert!(result.has_evidence_type("coreference"));
}

#[test]
fn disabled_negative_evidence_skips_the_scan() {
    let mut v = ContextValidator::new().unwrap();
    v.set_config(&overrides(json!({ "enable_negative_evidence": false })));
    let ctx = at("The config uses `max_retries` to control behavior.", "max_retries").with_rule("spelling", "spell_check");
    let result = v.validate_error(&ctx);
    assert!(signals(&result).is_empty());
    assert_eq!(v.short_circuit_count(), 0);
}

// ─── Discourse evidence ──────────────────────────────────────────────────────

#[test]
fn plain_prose_collects_every_analysis() {
    let mut v = ContextValidator::new().unwrap();
    let ctx = at(
        "The documentation is comprehensive. It covers all topics thoroughly. However, the examples are brief.",
        "It",
    )
    .with_rule("style", "pronoun_usage");
    let result = v.validate_error(&ctx);
    for evidence_type in [
        "coreference",
        "discourse_flow",
        "semantic_consistency",
        "contextual_appropriateness",
    ] {
        assert!(result.has_evidence_type(evidence_type), "missing {evidence_type}");
    }
    assert_eq!(result.metadata.get("sentence_index"), Some(&json!(1)));
    assert_eq!(result.metadata.get("context_sentences"), Some(&json!(3)));
}

#[test]
fn context_window_is_configurable() {
    let mut v = ContextValidator::new().unwrap();
    v.set_config(&overrides(json!({ "context_window_size": 1 })));
    let ctx = at(
        "The first line ends. The second line ends. The third line ends. The fourth line ends. The fifth line ends.",
        "third",
    )
    .with_rule("style", "repetition");
    let result = v.validate_error(&ctx);
    assert_eq!(result.metadata.get("context_sentences"), Some(&json!(3)));
}

#[test]
fn toggles_remove_their_evidence() {
    let mut v = ContextValidator::new().unwrap();
    v.set_config(&overrides(json!({
        "enable_coreference": false,
        "enable_discourse_analysis": false,
        "enable_semantic_consistency": false,
        "enable_appropriateness": false,
    })));
    let ctx = at("The cat sat on the mat.", "cat").with_rule("grammar", "agreement");
    let result = v.validate_error(&ctx);
    assert!(result.evidence.is_empty());
    assert_eq!(result.decision, ValidationDecision::Uncertain);
    assert!(result.reasoning.contains("No contextual evidence"));
}

#[test]
fn statistics_report_short_circuits() {
    let mut v = ContextValidator::new().unwrap();
    let quoted = at("The reviewer wrote \"teh\" in the margin.", "teh");
    v.validate_error(&quoted);
    v.validate_error(&quoted);
    let stats = v.get_analysis_statistics();
    assert_eq!(stats.counters["negative_evidence_short_circuits"], 2);
    assert_eq!(v.get_performance_summary().decision_counts["reject"], 2);
}
