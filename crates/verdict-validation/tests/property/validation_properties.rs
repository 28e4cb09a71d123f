use proptest::prelude::*;
use serde_json::json;
use verdict_core::models::{ValidationContext, ValidationResult};
use verdict_validation::{
    ContextValidator, CrossRuleValidator, DomainValidator, MorphologicalValidator, PassValidator,
};

fn validators() -> Vec<Box<dyn PassValidator>> {
    vec![
        Box::new(MorphologicalValidator::new().unwrap()),
        Box::new(ContextValidator::new().unwrap()),
        Box::new(DomainValidator::new().unwrap()),
        Box::new(CrossRuleValidator::new().unwrap()),
    ]
}

fn rule_type() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec![
        "grammar",
        "style",
        "spelling",
        "punctuation",
        "terminology",
        "tone",
        "content",
    ]))
}

fn check_bounds(result: &ValidationResult) -> Result<(), TestCaseError> {
    prop_assert!((0.0..=1.0).contains(&result.confidence_score));
    for evidence in &result.evidence {
        prop_assert!((0.0..=1.0).contains(&evidence.confidence));
        prop_assert!(evidence.weight >= 0.0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_input_yields_bounded_results(
        text in "\\PC{0,160}",
        position in 0usize..400,
        error_text in "\\PC{0,12}",
        rule_type in rule_type(),
    ) {
        let mut ctx = ValidationContext::new(text, position, error_text);
        if let Some(rule_type) = rule_type {
            ctx = ctx.with_rule(rule_type, "generated_rule");
        }
        for mut validator in validators() {
            let result = validator.validate_error(&ctx);
            check_bounds(&result)?;
            prop_assert_eq!(result.error_position, position);
        }
    }

    #[test]
    fn arbitrary_sibling_lists_never_escape(
        text in "[A-Za-z ,.`\"']{1,120}",
        rules in prop::collection::vec("[a-z_]{1,16}", 0..8),
        positions in prop::collection::vec(0usize..200, 0..6),
    ) {
        let errors: Vec<_> = positions
            .iter()
            .map(|p| json!({"rule_type": "grammar", "rule_name": "generated", "position": p}))
            .collect();
        let ctx = ValidationContext::new(text, 0, "x")
            .with_rule("grammar", "generated")
            .with_additional("all_rules", json!(rules))
            .with_additional("all_errors", json!(errors));
        let mut validator = CrossRuleValidator::new().unwrap();
        let result = validator.validate_error(&ctx);
        check_bounds(&result)?;
        prop_assert!(!result.is_error_result());
    }

    #[test]
    fn validation_is_deterministic(
        text in "[A-Za-z ,.]{1,120}",
        position in 0usize..120,
        rule_type in rule_type(),
    ) {
        let ctx = ValidationContext::new(text, position, "")
            .with_rule(rule_type.unwrap_or("grammar"), "generated_rule");
        for mut validator in validators() {
            let first = validator.validate_error(&ctx);
            let second = validator.validate_error(&ctx);
            prop_assert_eq!(first.decision, second.decision);
            prop_assert!((first.confidence_score - second.confidence_score).abs() < 1e-9);
            prop_assert_eq!(first.evidence.len(), second.evidence.len());
        }
    }
}
