use proptest::prelude::*;
use verdict_core::models::{ValidationConfidence, ValidationContext, ValidationDecision, ValidationEvidence, ValidationResult};

proptest! {
    #[test]
    fn level_matches_threshold_contract(score in 0.0f64..=1.0) {
        let level = ValidationConfidence::from_score(score);
        let expected = if score >= 0.8 {
            ValidationConfidence::High
        } else if score >= 0.5 {
            ValidationConfidence::Medium
        } else {
            ValidationConfidence::Low
        };
        prop_assert_eq!(level, expected);
    }

    #[test]
    fn evidence_confidence_always_in_unit_range(raw in proptest::num::f64::ANY) {
        let e = ValidationEvidence::new("any", raw, "d");
        prop_assert!((0.0..=1.0).contains(&e.confidence));
    }

    #[test]
    fn result_score_always_in_unit_range(raw in -10.0f64..10.0) {
        let ctx = ValidationContext::new("t", 0, "t");
        let r = ValidationResult::new("v", ValidationDecision::Uncertain, raw, vec![], "r", &ctx);
        prop_assert!((0.0..=1.0).contains(&r.confidence_score));
        prop_assert_eq!(r.confidence, ValidationConfidence::from_score(r.confidence_score));
    }
}
