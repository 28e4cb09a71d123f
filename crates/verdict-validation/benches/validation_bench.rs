use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use verdict_core::models::ValidationContext;
use verdict_validation::{
    ContextValidator, CrossRuleValidator, DomainValidator, MorphologicalValidator, PassValidator,
};

const TEXT: &str = "The documentation is comprehensive. It covers all topics thoroughly. \
                    However, the examples for the API server are brief and the config section is missing.";

fn pronoun_ctx() -> ValidationContext {
    ValidationContext::new(TEXT, 36, "It")
        .with_rule("style", "pronoun_usage")
        .with_additional("all_rules", json!(["pronoun_usage", "conciseness", "passive_voice"]))
        .with_additional(
            "all_errors",
            json!([
                {"rule_type": "style", "rule_name": "conciseness", "position": 60, "severity": "low"},
                {"rule_type": "grammar", "rule_name": "agreement", "position": 110, "severity": "high"}
            ]),
        )
}

/// Repeated text, so the NLP document comes from the cache after the first call.
fn bench_validators_warm(c: &mut Criterion) {
    let ctx = pronoun_ctx();
    let mut morphological = MorphologicalValidator::new().unwrap();
    let mut context = ContextValidator::new().unwrap();
    let mut domain = DomainValidator::new().unwrap();
    let mut cross_rule = CrossRuleValidator::new().unwrap();

    c.bench_function("morphological_warm", |b| {
        b.iter(|| morphological.validate_error(black_box(&ctx)));
    });
    c.bench_function("context_warm", |b| {
        b.iter(|| context.validate_error(black_box(&ctx)));
    });
    c.bench_function("domain_warm", |b| {
        b.iter(|| domain.validate_error(black_box(&ctx)));
    });
    c.bench_function("cross_rule_warm", |b| {
        b.iter(|| cross_rule.validate_error(black_box(&ctx)));
    });
}

/// Caches cleared every iteration: full analysis cost.
fn bench_validators_cold(c: &mut Criterion) {
    let ctx = pronoun_ctx();
    let mut morphological = MorphologicalValidator::new().unwrap();
    let mut context = ContextValidator::new().unwrap();

    c.bench_function("morphological_cold", |b| {
        b.iter(|| {
            morphological.clear_caches();
            morphological.validate_error(black_box(&ctx))
        });
    });
    c.bench_function("context_cold", |b| {
        b.iter(|| {
            context.clear_caches();
            context.validate_error(black_box(&ctx))
        });
    });
}

fn bench_negative_short_circuit(c: &mut Criterion) {
    let mut context = ContextValidator::new().unwrap();
    let ctx = ValidationContext::new("The config uses `max_retries` to control behavior.", 17, "max_retries")
        .with_rule("spelling", "spell_check");

    c.bench_function("context_short_circuit", |b| {
        b.iter(|| context.validate_error(black_box(&ctx)));
    });
}

criterion_group!(
    benches,
    bench_validators_warm,
    bench_validators_cold,
    bench_negative_short_circuit
);
criterion_main!(benches);
