//! Long-running validators: bounded history, steady metrics and cache reuse
//! over many calls.

use serde_json::json;
use verdict_core::models::ValidationContext;
use verdict_validation::{CrossRuleValidator, DomainValidator, PassValidator};

// ─── History bound ───────────────────────────────────────────────────────────

#[test]
fn history_stays_bounded_and_keeps_newest() {
    let mut v = CrossRuleValidator::new().unwrap();
    for i in 0..1_200 {
        let ctx = ValidationContext::new("The cat sat on the mat.", i, "cat")
            .with_rule("grammar", "agreement")
            .with_additional("all_rules", json!(["agreement", "comma_splice"]));
        v.validate_error(&ctx);
    }
    let history = v.validation_history();
    assert_eq!(history.len(), 1_000);
    assert_eq!(history.front().unwrap().error_position, 200);
    assert_eq!(history.back().unwrap().error_position, 1_199);

    let summary = v.get_performance_summary();
    assert_eq!(summary.total_validations, 1_200);
    assert_eq!(summary.history_size, 1_000);
    assert_eq!(v.cache_hits(), 1_199);
}

// ─── Many texts ──────────────────────────────────────────────────────────────

#[test]
fn many_distinct_texts_stay_well_formed() {
    let mut v = DomainValidator::new().unwrap();
    let topics = ["server", "customer", "research", "dragon", "weather"];
    for i in 0..500 {
        let topic = topics[i % topics.len()];
        let text = format!("Entry {i}: the {topic} notes were reviewed and the {topic} plan changed.");
        let ctx = ValidationContext::new(text, 12, topic).with_rule("style", "repetition");
        let result = v.validate_error(&ctx);
        assert!((0.0..=1.0).contains(&result.confidence_score));
    }
    let stats = v.get_analysis_statistics();
    assert_eq!(stats.caches["domain_analyses"].misses, 500);
    assert_eq!(v.get_performance_summary().validation_errors, 0);
}
