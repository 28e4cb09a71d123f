//! Default `ConfidenceCalculator`: a rule-type prior adjusted by position, length and genre.

use std::collections::BTreeMap;

use verdict_core::models::ConfidenceBreakdown;
use verdict_core::traits::ConfidenceCalculator;

use crate::text::clamp_unit;

const DEFAULT_PRIOR: f64 = 0.6;

fn rule_prior(rule_type: &str) -> f64 {
    match rule_type {
        "spelling" => 0.85,
        "grammar" => 0.75,
        "punctuation" => 0.7,
        "terminology" => 0.65,
        "style" => 0.6,
        "tone" => 0.55,
        _ => DEFAULT_PRIOR,
    }
}

/// Deterministic arithmetic only; no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicConfidenceCalculator;

impl ConfidenceCalculator for HeuristicConfidenceCalculator {
    fn calculate(
        &self,
        text: &str,
        error_position: usize,
        rule_type: Option<&str>,
        content_type: Option<&str>,
    ) -> ConfidenceBreakdown {
        let rule_type = rule_type.unwrap_or("");
        let base = rule_prior(rule_type);
        let mut components = BTreeMap::new();

        let len = text.chars().count();
        if len == 0 || error_position >= len {
            components.insert("position_out_of_range".to_string(), -0.2);
        }
        if len > 0 && len < 20 {
            components.insert("short_text".to_string(), -0.1);
        }
        match (content_type, rule_type) {
            (Some("creative" | "narrative"), "grammar" | "style") => {
                components.insert("creative_license".to_string(), -0.1);
            }
            (Some("technical" | "documentation"), "terminology") => {
                components.insert("technical_terminology".to_string(), 0.1);
            }
            (Some("academic"), "grammar" | "punctuation") => {
                components.insert("formal_register".to_string(), 0.05);
            }
            _ => {}
        }

        let final_confidence = clamp_unit(base + components.values().sum::<f64>());
        let explanation = if components.is_empty() {
            format!("prior {base:.2} for rule type '{rule_type}'")
        } else {
            let names: Vec<&str> = components.keys().map(String::as_str).collect();
            format!(
                "prior {base:.2} for rule type '{rule_type}' adjusted by {}",
                names.join(", ")
            )
        };

        ConfidenceBreakdown {
            final_confidence,
            base_confidence: base,
            components,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_depends_on_rule_type() {
        let calc = HeuristicConfidenceCalculator;
        let text = "A sentence long enough to avoid the short-text penalty.";
        let grammar = calc.calculate(text, 3, Some("grammar"), None);
        let tone = calc.calculate(text, 3, Some("tone"), None);
        assert!(grammar.final_confidence > tone.final_confidence);
        assert!(grammar.components.is_empty());
    }

    #[test]
    fn out_of_range_position_is_penalised() {
        let calc = HeuristicConfidenceCalculator;
        let b = calc.calculate("tiny", 99, Some("spelling"), None);
        assert!((b.final_confidence - 0.55).abs() < 1e-9);
        assert!(b.explanation.contains("position_out_of_range"));
    }

    #[test]
    fn genre_adjustments() {
        let calc = HeuristicConfidenceCalculator;
        let text = "Once upon a time there was a very long story indeed.";
        let creative = calc.calculate(text, 0, Some("grammar"), Some("creative"));
        assert!((creative.final_confidence - 0.65).abs() < 1e-9);
    }
}
