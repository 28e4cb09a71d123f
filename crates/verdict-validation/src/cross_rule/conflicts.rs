//! Pairwise conflicts between the rules applied in one pass.

use verdict_core::models::ValidationEvidence;

use crate::knowledge::{CompiledConflictPatterns, ConflictSeverity, RuleKnowledge};
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "rule_conflict_detection";

/// Conflicts past this count raise the overall severity to at least moderate.
const MODERATE_CONFLICT_COUNT: usize = 3;
/// Conflicts past this count favour human review.
const ESCALATION_CONFLICT_COUNT: usize = 5;
const HALT: &str = "halt_processing";
const ESCALATE: &str = "escalate_to_human_review";
const DEFAULT_STRATEGY: &str = "apply_both_rules";
const NO_CONFLICT_CONFIDENCE: f64 = 0.85;
const EXTRA_CONFLICT_PENALTY: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictSource {
    Known,
    Pattern,
    SameCategory,
}

impl ConflictSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Known => "known_conflict",
            Self::Pattern => "conflict_pattern",
            Self::SameCategory => "same_category",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleConflict {
    pub rule_a: String,
    pub rule_b: String,
    pub name: String,
    pub severity: ConflictSeverity,
    pub source: ConflictSource,
    /// Only catalogued conflicts carry a fixed resolution.
    pub resolution: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictAnalysis {
    pub rules: Vec<String>,
    pub conflicts: Vec<RuleConflict>,
    /// Worst conflict, `None` when the rules coexist.
    pub severity: Option<ConflictSeverity>,
    pub strategy: String,
    pub confidence: f64,
}

fn pair_conflicts(
    a: &str,
    b: &str,
    knowledge: &RuleKnowledge,
    patterns: &CompiledConflictPatterns,
) -> Vec<RuleConflict> {
    let conflict = |name: &str,
                    severity: ConflictSeverity,
                    source: ConflictSource,
                    resolution: Option<&str>,
                    description: &str| RuleConflict {
        rule_a: a.to_string(),
        rule_b: b.to_string(),
        name: name.to_string(),
        severity,
        source,
        resolution: resolution.map(str::to_string),
        description: description.to_string(),
    };

    let mut found = Vec::new();
    if let Some(known) = knowledge.known_conflict(a, b) {
        found.push(conflict(
            known.name.as_str(),
            known.severity,
            ConflictSource::Known,
            Some(known.strategy.as_str()),
            &format!("{} and {} are a catalogued conflict", known.rule_a, known.rule_b),
        ));
    }
    for pair in patterns.conflicts_between(a, b) {
        found.push(conflict(
            pair.name.as_str(),
            pair.severity,
            ConflictSource::Pattern,
            None,
            pair.description.as_str(),
        ));
    }
    if found.is_empty() {
        let category_a = knowledge.category_of(a);
        if let Some(category) = category_a.filter(|c| {
            category_a == knowledge.category_of(b)
                && knowledge.overlapping_categories.iter().any(|o| o.as_str() == *c)
        }) {
            found.push(conflict(
                &format!("{category}_overlap"),
                ConflictSeverity::Minor,
                ConflictSource::SameCategory,
                None,
                &format!("both rules adjust {category}"),
            ));
        }
    }
    found
}

/// Worst pairwise severity, raised to moderate when conflicts pile up.
pub fn overall_severity(conflicts: &[RuleConflict]) -> Option<ConflictSeverity> {
    let worst = conflicts.iter().map(|c| c.severity).max()?;
    if conflicts.len() > MODERATE_CONFLICT_COUNT {
        Some(worst.max(ConflictSeverity::Moderate))
    } else {
        Some(worst)
    }
}

pub fn resolution_strategy(
    severity: Option<ConflictSeverity>,
    conflict_count: usize,
    knowledge: &RuleKnowledge,
) -> String {
    let Some(severity) = severity else {
        return DEFAULT_STRATEGY.to_string();
    };
    let candidates = knowledge.strategies_for(severity);
    let has = |s: &str| candidates.iter().any(|c| c == s);
    let chosen = if severity == ConflictSeverity::Critical && has(HALT) {
        HALT
    } else if conflict_count > ESCALATION_CONFLICT_COUNT && has(ESCALATE) {
        ESCALATE
    } else {
        candidates.first().map_or(DEFAULT_STRATEGY, String::as_str)
    };
    chosen.to_string()
}

fn severity_confidence(severity: ConflictSeverity) -> f64 {
    match severity {
        ConflictSeverity::Minor => 0.75,
        ConflictSeverity::Moderate => 0.6,
        ConflictSeverity::Severe => 0.4,
        ConflictSeverity::Critical => 0.15,
    }
}

/// Every unordered pair of `rules`, in the order given.
pub fn detect(rules: &[String], knowledge: &RuleKnowledge, patterns: &CompiledConflictPatterns) -> ConflictAnalysis {
    let mut conflicts = Vec::new();
    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            conflicts.extend(pair_conflicts(a, b, knowledge, patterns));
        }
    }

    let severity = overall_severity(&conflicts);
    let strategy = resolution_strategy(severity, conflicts.len(), knowledge);
    let confidence = match severity {
        None => NO_CONFLICT_CONFIDENCE,
        Some(s) => clamp_unit(
            severity_confidence(s) - EXTRA_CONFLICT_PENALTY * conflicts.len().saturating_sub(1) as f64,
        )
        .max(0.05),
    };

    ConflictAnalysis {
        rules: rules.to_vec(),
        conflicts,
        severity,
        strategy,
        confidence,
    }
}

impl ConflictAnalysis {
    pub fn severity_str(&self) -> &'static str {
        self.severity.map_or("none", ConflictSeverity::as_str)
    }

    pub fn to_evidence(&self) -> ValidationEvidence {
        let description = match self.severity {
            None => format!("no conflicts among {} rules", self.rules.len()),
            Some(severity) => format!(
                "{} conflict(s) among {} rules, overall {severity}; resolution: {}",
                self.conflicts.len(),
                self.rules.len(),
                self.strategy
            ),
        };
        let conflicts: Vec<serde_json::Value> = self
            .conflicts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "rules": [c.rule_a, c.rule_b],
                    "name": c.name,
                    "severity": c.severity.as_str(),
                    "source": c.source.as_str(),
                    "resolution": c.resolution,
                    "description": c.description,
                })
            })
            .collect();
        ValidationEvidence::new(EVIDENCE_TYPE, self.confidence, description)
            .with_data("rules_analyzed", self.rules.len() as u64)
            .with_data("conflict_count", self.conflicts.len() as u64)
            .with_data("conflict_severity", self.severity_str())
            .with_data("resolution_strategy", self.strategy.as_str())
            .with_data("conflicts", conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rules: &[&str]) -> ConflictAnalysis {
        let kb = RuleKnowledge::default();
        let patterns = CompiledConflictPatterns::compile(&kb).unwrap();
        let rules: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        detect(&rules, &kb, &patterns)
    }

    #[test]
    fn catalogued_pair_carries_its_severity_and_resolution() {
        let a = run(&["content_reduction", "information_completeness"]);
        assert_eq!(a.severity, Some(ConflictSeverity::Severe));
        assert_eq!(a.conflicts[0].source, ConflictSource::Known);
        assert_eq!(a.conflicts[0].resolution.as_deref(), Some("prioritize_completeness"));
        assert_eq!(a.strategy, "apply_single_rule");
    }

    #[test]
    fn critical_conflict_halts() {
        let a = run(&["delete_content", "required_content"]);
        assert_eq!(a.severity, Some(ConflictSeverity::Critical));
        assert_eq!(a.strategy, HALT);
        assert!(a.confidence < 0.2);
    }

    #[test]
    fn voice_pattern_matches_in_either_order() {
        let a = run(&["active_voice_preference", "passive_construction"]);
        assert!(a.conflicts.iter().any(|c| c.name == "voice_conflict"));
    }

    #[test]
    fn two_style_rules_overlap() {
        let a = run(&["wordiness", "sentence_length"]);
        assert_eq!(a.conflicts.len(), 1);
        assert_eq!(a.conflicts[0].source, ConflictSource::SameCategory);
        assert_eq!(a.severity, Some(ConflictSeverity::Minor));
    }

    #[test]
    fn unrelated_rules_coexist() {
        let a = run(&["spelling", "comma_splice"]);
        assert!(a.conflicts.is_empty());
        assert_eq!(a.severity_str(), "none");
        assert_eq!(a.confidence, NO_CONFLICT_CONFIDENCE);
    }

    #[test]
    fn many_minor_conflicts_become_moderate() {
        let minor = |n: usize| RuleConflict {
            rule_a: format!("a{n}"),
            rule_b: format!("b{n}"),
            name: "x".into(),
            severity: ConflictSeverity::Minor,
            source: ConflictSource::SameCategory,
            resolution: None,
            description: String::new(),
        };
        let three: Vec<_> = (0..3).map(minor).collect();
        assert_eq!(overall_severity(&three), Some(ConflictSeverity::Minor));
        let four: Vec<_> = (0..4).map(minor).collect();
        assert_eq!(overall_severity(&four), Some(ConflictSeverity::Moderate));
        assert_eq!(overall_severity(&[]), None);
    }

    #[test]
    fn crowded_passes_escalate() {
        let kb = RuleKnowledge::default();
        assert_eq!(resolution_strategy(Some(ConflictSeverity::Moderate), 6, &kb), ESCALATE);
        assert_eq!(
            resolution_strategy(Some(ConflictSeverity::Moderate), 2, &kb),
            "apply_higher_priority_rule"
        );
        assert_eq!(resolution_strategy(None, 0, &kb), DEFAULT_STRATEGY);
    }
}
