//! Whether the errors flagged in one pass make sense together.

use std::collections::BTreeSet;

use verdict_core::models::{ErrorRecord, ValidationEvidence};

use super::types::CoherenceLevel;
use crate::knowledge::rules::matches_token_prefixes;
use crate::knowledge::{CompiledConflictPatterns, ConflictSeverity, RuleKnowledge};
use crate::text::{clamp_unit, ratio};

pub const EVIDENCE_TYPE: &str = "error_coherence";

const LOGICAL_WEIGHT: f64 = 0.3;
const TEMPORAL_WEIGHT: f64 = 0.2;
const SEMANTIC_WEIGHT: f64 = 0.3;
const STRUCTURAL_WEIGHT: f64 = 0.2;
const SEMANTIC_BASELINE: f64 = 0.95;
const STRUCTURAL_BASELINE: f64 = 0.8;
const LOGICAL_CONFLICT_PENALTY: f64 = 0.3;
const ORDER_PENALTY: f64 = 0.2;
/// More distinct tense rules than this in one pass pull the text in different directions.
const MAX_TENSE_RULES: usize = 2;
const TENSE_RULE_PENALTY: f64 = 0.2;
const CONTRADICTION_PENALTY: f64 = 0.1;
const GROUPING_ERROR_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Contradiction {
    pub rule_a: String,
    pub rule_b: String,
    pub name: String,
    pub severity: ConflictSeverity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceAnalysis {
    pub logical_consistency: f64,
    pub temporal_consistency: f64,
    pub semantic_consistency: f64,
    pub structural_consistency: f64,
    pub score: f64,
    pub level: CoherenceLevel,
    pub contradictions: Vec<Contradiction>,
    pub inconsistency_areas: Vec<String>,
    pub suggestions: Vec<String>,
    pub confidence: f64,
}

fn distinct_rule_names(errors: &[ErrorRecord]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    errors
        .iter()
        .map(|e| e.rule_name.as_str())
        .filter(|n| !n.is_empty() && seen.insert(*n))
        .collect()
}

/// Share of siblings (the current error excluded) reported out of text order.
fn order_inversions(errors: &[ErrorRecord]) -> f64 {
    let siblings = errors.get(1..).unwrap_or_default();
    if siblings.len() < 2 {
        return 0.0;
    }
    let inversions = siblings.windows(2).filter(|w| w[1].position < w[0].position).count();
    ratio(inversions, siblings.len() - 1)
}

fn logical_consistency(names: &[&str], errors: &[ErrorRecord], knowledge: &RuleKnowledge) -> (f64, Vec<String>) {
    let mut score: f64 = 1.0;
    let mut areas = Vec::new();
    for (group, keywords) in &knowledge.logical_conflicts {
        let all_present = !keywords.is_empty()
            && keywords
                .iter()
                .all(|k| names.iter().any(|n| matches_token_prefixes(n, k)));
        if all_present {
            score -= LOGICAL_CONFLICT_PENALTY;
            areas.push(format!("logical:{group}"));
        }
    }
    let inversions = order_inversions(errors);
    if inversions > 0.0 {
        score -= ORDER_PENALTY * inversions;
        areas.push("error_ordering".to_string());
    }
    (clamp_unit(score), areas)
}

fn temporal_consistency(names: &[&str], knowledge: &RuleKnowledge) -> f64 {
    let tense_rules = names.iter().filter(|n| knowledge.is_tense_rule(n)).count();
    if tense_rules > MAX_TENSE_RULES {
        (1.0 - TENSE_RULE_PENALTY * (tense_rules - MAX_TENSE_RULES) as f64).max(0.2)
    } else {
        1.0
    }
}

fn contradictions(names: &[&str], patterns: &CompiledConflictPatterns) -> Vec<Contradiction> {
    let mut found = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            if let Some(pair) = patterns.contradiction_between(a, b) {
                found.push(Contradiction {
                    rule_a: a.to_string(),
                    rule_b: b.to_string(),
                    name: pair.name.clone(),
                    severity: pair.severity,
                    description: pair.description.clone(),
                });
            }
        }
    }
    found
}

pub fn analyze(
    errors: &[ErrorRecord],
    knowledge: &RuleKnowledge,
    patterns: &CompiledConflictPatterns,
) -> CoherenceAnalysis {
    let names = distinct_rule_names(errors);
    let (logical, mut areas) = logical_consistency(&names, errors, knowledge);
    let temporal = temporal_consistency(&names, knowledge);
    if temporal < 1.0 {
        areas.push("temporal:mixed_tense_corrections".to_string());
    }
    let contradictions = contradictions(&names, patterns);
    if !contradictions.is_empty() {
        areas.push("contradictory_rules".to_string());
    }

    let score = clamp_unit(
        LOGICAL_WEIGHT * logical
            + TEMPORAL_WEIGHT * temporal
            + SEMANTIC_WEIGHT * SEMANTIC_BASELINE
            + STRUCTURAL_WEIGHT * STRUCTURAL_BASELINE,
    );

    let mut suggestions = Vec::new();
    if errors.len() > GROUPING_ERROR_COUNT {
        suggestions.push("Group similar corrections to reduce fragmentation".to_string());
    }
    if !contradictions.is_empty() {
        suggestions.push("Resolve contradictory rules before applying their corrections".to_string());
    }
    if temporal < 1.0 {
        suggestions.push("Standardise tense corrections on one verb tense".to_string());
    }
    if logical < 1.0 {
        suggestions.push("Review corrections that pull content or register in opposite directions".to_string());
    }

    CoherenceAnalysis {
        logical_consistency: logical,
        temporal_consistency: temporal,
        semantic_consistency: SEMANTIC_BASELINE,
        structural_consistency: STRUCTURAL_BASELINE,
        score,
        level: CoherenceLevel::from_score(score),
        confidence: clamp_unit(score - CONTRADICTION_PENALTY * contradictions.len() as f64),
        contradictions,
        inconsistency_areas: areas,
        suggestions,
    }
}

impl CoherenceAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        let contradictions: Vec<serde_json::Value> = self
            .contradictions
            .iter()
            .map(|c| {
                serde_json::json!({
                    "rules": [c.rule_a, c.rule_b],
                    "name": c.name,
                    "severity": c.severity.as_str(),
                    "description": c.description,
                })
            })
            .collect();
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} coherence ({:.2}) with {} contradiction(s)",
                self.level,
                self.score,
                self.contradictions.len()
            ),
        )
        .with_data("coherence_level", self.level.as_str())
        .with_data("coherence_score", self.score)
        .with_data("logical_consistency", self.logical_consistency)
        .with_data("temporal_consistency", self.temporal_consistency)
        .with_data("semantic_consistency", self.semantic_consistency)
        .with_data("structural_consistency", self.structural_consistency)
        .with_data("contradictions", contradictions)
        .with_data("inconsistency_areas", self.inconsistency_areas.clone())
        .with_data("suggestions", self.suggestions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(rule_name: &str, position: usize) -> ErrorRecord {
        ErrorRecord {
            rule_type: "style".to_string(),
            rule_name: rule_name.to_string(),
            position,
            severity: "medium".to_string(),
            message: String::new(),
            error_text: String::new(),
        }
    }

    fn run(errors: &[ErrorRecord]) -> CoherenceAnalysis {
        let kb = RuleKnowledge::default();
        let patterns = CompiledConflictPatterns::compile(&kb).unwrap();
        analyze(errors, &kb, &patterns)
    }

    #[test]
    fn unrelated_errors_are_good() {
        let a = run(&[error("spelling", 4), error("comma_splice", 10), error("wordiness", 30)]);
        assert!((a.score - 0.945).abs() < 1e-9);
        assert_eq!(a.level, CoherenceLevel::Excellent);
        assert!(a.inconsistency_areas.is_empty());
    }

    #[test]
    fn add_and_remove_rules_lower_logical_consistency() {
        let a = run(&[error("add_missing_content", 4), error("remove_redundant_content", 20)]);
        assert!((a.logical_consistency - 0.7).abs() < 1e-9);
        assert!(a.inconsistency_areas.contains(&"logical:content_modification".to_string()));
        assert_eq!(a.contradictions.len(), 1);
        assert_eq!(a.contradictions[0].name, "add_remove");
        assert!(a.confidence < a.score);
    }

    #[test]
    fn many_tense_rules_hurt_temporal_consistency() {
        let a = run(&[
            error("past_tense", 1),
            error("present_tense", 5),
            error("future_tense", 9),
            error("tense_shift", 14),
        ]);
        assert!((a.temporal_consistency - 0.6).abs() < 1e-9);
        assert!(a.suggestions.iter().any(|s| s.contains("tense")));
    }

    #[test]
    fn sibling_order_inversions_are_penalised() {
        let a = run(&[error("spelling", 50), error("comma_splice", 40), error("wordiness", 10)]);
        assert!((a.logical_consistency - 0.8).abs() < 1e-9);
        let b = run(&[error("spelling", 50), error("comma_splice", 10), error("wordiness", 40)]);
        assert_eq!(b.logical_consistency, 1.0);
    }
}
