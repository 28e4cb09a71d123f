//! Quality of the merge/deduplication applied to the errors of one pass.

use std::collections::{BTreeMap, BTreeSet};

use verdict_core::models::{ErrorRecord, ValidationEvidence};

use crate::knowledge::RuleKnowledge;
use crate::text::{clamp_unit, mean, ratio};

pub const EVIDENCE_TYPE: &str = "consolidation_quality";

/// Errors of the same rule type this close (in characters) could have been merged.
const MERGE_DISTANCE: usize = 50;
/// More errors of one rule type than this suggests an over-eager merge upstream.
const OVER_CONSOLIDATION_COUNT: usize = 8;
const UNTYPED: &str = "unknown";
const MISSED_MERGE_PENALTY: f64 = 0.05;
const MAX_MISSED_MERGE_PENALTY: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationAnalysis {
    /// Error count per rule type.
    pub groups: BTreeMap<String, usize>,
    pub quality: f64,
    pub merge_appropriateness: f64,
    pub priority_accuracy: f64,
    pub completeness: f64,
    pub redundancy_elimination: f64,
    pub missed_merges: Vec<String>,
    pub over_consolidation: Vec<String>,
    pub confidence: f64,
}

fn group_size_quality(size: usize) -> f64 {
    match size {
        0 | 1 => 0.6,
        2..=5 => 1.0,
        6..=10 => 0.7,
        _ => 0.4,
    }
}

fn type_of(error: &ErrorRecord) -> &str {
    if error.rule_type.is_empty() {
        UNTYPED
    } else {
        error.rule_type.as_str()
    }
}

/// 1 minus half the share of neighbouring errors close enough to merge.
fn merge_appropriateness(errors: &[ErrorRecord]) -> f64 {
    let mut positions: Vec<usize> = errors.iter().map(|e| e.position).collect();
    positions.sort_unstable();
    if positions.len() < 2 {
        return 1.0;
    }
    let close = positions.windows(2).filter(|w| w[1] - w[0] < MERGE_DISTANCE).count();
    1.0 - 0.5 * ratio(close, positions.len() - 1)
}

/// 1 minus the share of adjacent pairs where a lighter error precedes a heavier one.
fn priority_accuracy(errors: &[ErrorRecord], knowledge: &RuleKnowledge) -> f64 {
    if errors.len() < 2 {
        return 1.0;
    }
    let inversions = errors
        .windows(2)
        .filter(|w| knowledge.severity_weight(&w[0].severity) < knowledge.severity_weight(&w[1].severity))
        .count();
    1.0 - ratio(inversions, errors.len() - 1)
}

fn completeness(errors: &[ErrorRecord], knowledge: &RuleKnowledge) -> f64 {
    let classified = errors
        .iter()
        .filter(|e| !e.rule_type.is_empty() || knowledge.category_of(&e.rule_name).is_some())
        .count();
    0.5 + 0.5 * ratio(classified, errors.len())
}

fn missed_merges(errors: &[ErrorRecord]) -> Vec<String> {
    let mut by_type: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for error in errors {
        by_type.entry(type_of(error)).or_default().push(error.position);
    }
    let mut missed = Vec::new();
    for (rule_type, positions) in &mut by_type {
        positions.sort_unstable();
        for w in positions.windows(2) {
            if w[1] - w[0] <= MERGE_DISTANCE {
                missed.push(format!("{rule_type} at {} and {}", w[0], w[1]));
            }
        }
    }
    missed
}

pub fn analyze(errors: &[ErrorRecord], knowledge: &RuleKnowledge) -> ConsolidationAnalysis {
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for error in errors {
        *groups.entry(type_of(error).to_string()).or_default() += 1;
    }
    let sizes: Vec<f64> = groups.values().map(|&n| group_size_quality(n)).collect();
    let quality = mean(&sizes);

    let merge = merge_appropriateness(errors);
    let priority = priority_accuracy(errors, knowledge);
    let complete = completeness(errors, knowledge);
    let unique_names: BTreeSet<&str> = errors.iter().map(|e| e.rule_name.as_str()).collect();
    let redundancy = ratio(unique_names.len(), errors.len());

    let missed = missed_merges(errors);
    let over: Vec<String> = groups
        .iter()
        .filter(|&(_, &n)| n > OVER_CONSOLIDATION_COUNT)
        .map(|(t, n)| format!("{t} ({n} errors)"))
        .collect();

    let penalty = (MISSED_MERGE_PENALTY * missed.len() as f64).min(MAX_MISSED_MERGE_PENALTY);
    let confidence = clamp_unit(mean(&[quality, merge, priority, complete, redundancy]) - penalty);

    ConsolidationAnalysis {
        groups,
        quality,
        merge_appropriateness: merge,
        priority_accuracy: priority,
        completeness: complete,
        redundancy_elimination: redundancy,
        missed_merges: missed,
        over_consolidation: over,
        confidence,
    }
}

impl ConsolidationAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} error group(s), {} missed merge(s)",
                self.groups.len(),
                self.missed_merges.len()
            ),
        )
        .with_data("consolidation_quality", self.quality)
        .with_data("merge_appropriateness", self.merge_appropriateness)
        .with_data("priority_accuracy", self.priority_accuracy)
        .with_data("completeness", self.completeness)
        .with_data("redundancy_elimination", self.redundancy_elimination)
        .with_data("missed_opportunities", self.missed_merges.clone())
        .with_data("over_consolidation", self.over_consolidation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(rule_type: &str, rule_name: &str, position: usize, severity: &str) -> ErrorRecord {
        ErrorRecord {
            rule_type: rule_type.to_string(),
            rule_name: rule_name.to_string(),
            position,
            severity: severity.to_string(),
            message: String::new(),
            error_text: String::new(),
        }
    }

    #[test]
    fn nearby_same_type_errors_are_missed_merges() {
        let errors = [
            error("grammar", "agreement", 10, "high"),
            error("grammar", "tense", 30, "medium"),
            error("style", "wordiness", 200, "low"),
        ];
        let a = analyze(&errors, &RuleKnowledge::default());
        assert_eq!(a.missed_merges, vec!["grammar at 10 and 30".to_string()]);
        assert_eq!(a.priority_accuracy, 1.0);
        assert_eq!(a.redundancy_elimination, 1.0);
        assert_eq!(a.groups["grammar"], 2);
    }

    #[test]
    fn severity_inversions_lower_priority_accuracy() {
        let errors = [
            error("style", "wordiness", 0, "low"),
            error("grammar", "agreement", 100, "critical"),
        ];
        let a = analyze(&errors, &RuleKnowledge::default());
        assert_eq!(a.priority_accuracy, 0.0);
    }

    #[test]
    fn large_groups_are_flagged() {
        let errors: Vec<ErrorRecord> = (0..9)
            .map(|i| error("spelling", "typo", i * 100, "low"))
            .collect();
        let a = analyze(&errors, &RuleKnowledge::default());
        assert_eq!(a.over_consolidation, vec!["spelling (9 errors)".to_string()]);
        assert!((a.quality - 0.7).abs() < 1e-9);
        assert!((a.redundancy_elimination - 1.0 / 9.0).abs() < 1e-9);
    }
}
