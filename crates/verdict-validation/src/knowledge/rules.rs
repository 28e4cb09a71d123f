//! Rule-interaction tables for the cross-rule validator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{list, scores, table};

/// How badly two rules interfere. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Minor,
    Moderate,
    Severe,
    Critical,
}

impl ConflictSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, pre-catalogued conflict between two rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownConflict {
    pub name: String,
    /// Rule-name fragments; the pair matches in either order.
    pub rule_a: String,
    pub rule_b: String,
    pub severity: ConflictSeverity,
    pub strategy: String,
}

impl KnownConflict {
    pub fn matches(&self, first: &str, second: &str) -> bool {
        (first.contains(&self.rule_a) && second.contains(&self.rule_b))
            || (first.contains(&self.rule_b) && second.contains(&self.rule_a))
    }
}

/// Regex pair: a conflict exists when one rule name matches `left` and the other `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictPattern {
    pub name: String,
    pub left: String,
    pub right: String,
    pub severity: ConflictSeverity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleKnowledge {
    pub default_severity_weight: f64,
    /// Categories whose members step on each other when applied together.
    pub overlapping_categories: Vec<String>,
    /// Rule-name fragments that mark a tense correction.
    pub tense_keywords: Vec<String>,
    pub known_conflicts: Vec<KnownConflict>,
    pub conflict_patterns: Vec<ConflictPattern>,
    /// Regex pairs that make two rule names contradict each other.
    pub contradiction_patterns: Vec<ConflictPattern>,
    /// Category → rule-name fragments.
    pub rule_categories: BTreeMap<String, Vec<String>>,
    /// Severity → candidate resolution strategies, preferred first.
    pub severity_strategies: BTreeMap<String, Vec<String>>,
    /// Rule-name groups that should never be applied together. Each entry is
    /// two `_`-joined keyword sequences matched against rule-name token prefixes.
    pub logical_conflicts: BTreeMap<String, Vec<String>>,
    /// readability / clarity / consistency → rule-name fragments.
    pub improvement_keywords: BTreeMap<String, Vec<String>>,
    /// Error severity label → weight in `[0, 1]`.
    pub severity_weights: BTreeMap<String, f64>,
}

fn known(name: &str, rule_a: &str, rule_b: &str, severity: ConflictSeverity, strategy: &str) -> KnownConflict {
    KnownConflict {
        name: name.to_string(),
        rule_a: rule_a.to_string(),
        rule_b: rule_b.to_string(),
        severity,
        strategy: strategy.to_string(),
    }
}

fn pattern(name: &str, left: &str, right: &str, severity: ConflictSeverity, description: &str) -> ConflictPattern {
    ConflictPattern {
        name: name.to_string(),
        left: left.to_string(),
        right: right.to_string(),
        severity,
        description: description.to_string(),
    }
}

impl Default for RuleKnowledge {
    fn default() -> Self {
        use ConflictSeverity::*;
        Self {
            default_severity_weight: 0.5,
            overlapping_categories: list(&["style", "tone"]),
            tense_keywords: list(&["tense"]),
            known_conflicts: vec![
                known("conciseness_vs_clarity", "conciseness", "clarity", Moderate, "balance_brevity_and_clarity"),
                known("reduction_vs_completeness", "content_reduction", "information_completeness", Severe, "prioritize_completeness"),
                known("deletion_vs_required_content", "delete_content", "required_content", Critical, "halt_processing"),
                known("simplification_vs_precision", "simplification", "technical_precision", Moderate, "preserve_technical_accuracy"),
                known("formal_vs_conversational", "formal_tone", "conversational_tone", Moderate, "follow_domain_register"),
                known("passive_vs_objectivity", "passive_voice", "objective_voice", Minor, "prefer_domain_convention"),
            ],
            conflict_patterns: vec![
                pattern(
                    "contradictory_modifications",
                    r"(add|expand|insert|include|elaborat|extend)",
                    r"(remove|delet|reduc|cut|trim|omit)",
                    Severe,
                    "one rule adds content that the other removes",
                ),
                pattern(
                    "opposing_length_modifications",
                    r"(shorten|concis|brevity|brief|condens)",
                    r"(lengthen|elaborat|detail|verbos|expand)",
                    Moderate,
                    "rules push sentence length in opposite directions",
                ),
                pattern(
                    "formality_conflict",
                    r"(^|_)formal",
                    r"(informal|casual|conversational|colloquial)",
                    Moderate,
                    "rules demand different registers",
                ),
                pattern(
                    "voice_conflict",
                    r"passive",
                    r"active",
                    Moderate,
                    "rules prefer different grammatical voice",
                ),
                pattern(
                    "complexity_conflict",
                    r"(simplif|plain_language|readability)",
                    r"(technical_precision|jargon|complex|sophisticat)",
                    Minor,
                    "simplification competes with precision",
                ),
            ],
            contradiction_patterns: vec![
                pattern("add_remove", r"(^|_)add", r"(remove|delet)", Severe, "adds and removes content"),
                pattern("formal_informal", r"(^|_)formal", r"informal", Moderate, "formal and informal style"),
                pattern("passive_active", r"passive", r"active", Moderate, "passive and active voice"),
                pattern("expand_condense", r"expand", r"(condens|shorten)", Moderate, "expands and condenses"),
                pattern("singular_plural", r"singular", r"plural", Minor, "singular and plural agreement"),
            ],
            rule_categories: table(&[
                ("content", &["content", "completeness", "reduction", "detail", "required"]),
                ("grammar", &["grammar", "agreement", "tense", "verb", "pronoun", "article", "fragment"]),
                ("punctuation", &["punctuation", "comma", "apostrophe", "quote", "semicolon", "hyphen"]),
                ("spelling", &["spelling", "typo", "capitalization"]),
                ("style", &["style", "wordiness", "conciseness", "passive", "active", "voice", "readability", "clarity", "sentence_length", "simplification"]),
                ("terminology", &["terminology", "jargon", "technical", "precision", "acronym"]),
                ("tone", &["tone", "formal", "informal", "conversational", "formality"]),
            ]),
            severity_strategies: table(&[
                ("minor", &["apply_both_rules", "apply_higher_priority_rule"]),
                ("moderate", &["apply_higher_priority_rule", "merge_suggestions", "escalate_to_human_review"]),
                ("severe", &["apply_single_rule", "escalate_to_human_review"]),
                ("critical", &["halt_processing", "escalate_to_human_review"]),
            ]),
            logical_conflicts: table(&[
                ("content_modification", &["add_content", "remove_content"]),
                ("register", &["formal_style", "informal_style"]),
            ]),
            improvement_keywords: table(&[
                ("readability", &["readability", "sentence_length", "wordiness", "complex", "simplif", "passive", "conciseness"]),
                ("clarity", &["clarity", "ambigu", "vague", "pronoun", "precision", "jargon", "unclear"]),
                ("consistency", &["consistency", "tense", "terminology", "format", "capitalization", "parallel"]),
            ]),
            severity_weights: scores(&[
                ("critical", 1.0),
                ("high", 0.8),
                ("medium", 0.5),
                ("low", 0.2),
            ]),
        }
    }
}

impl RuleKnowledge {
    /// First category (in name order) with a fragment prefixing the words of `rule_name`.
    pub fn category_of(&self, rule_name: &str) -> Option<&str> {
        self.rule_categories
            .iter()
            .find(|(_, fragments)| fragments.iter().any(|f| matches_token_prefixes(rule_name, f)))
            .map(|(category, _)| category.as_str())
    }

    pub fn known_conflict(&self, first: &str, second: &str) -> Option<&KnownConflict> {
        self.known_conflicts.iter().find(|k| k.matches(first, second))
    }

    pub fn strategies_for(&self, severity: ConflictSeverity) -> &[String] {
        self.severity_strategies
            .get(severity.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn severity_weight(&self, severity: &str) -> f64 {
        self.severity_weights
            .get(&severity.to_lowercase())
            .copied()
            .unwrap_or(self.default_severity_weight)
    }

    pub fn is_tense_rule(&self, rule_name: &str) -> bool {
        self.tense_keywords.iter().any(|k| matches_token_prefixes(rule_name, k))
    }
}

/// Whether every `_`-separated word of `keyword` prefixes some token of `rule_name`, in order.
pub fn matches_token_prefixes(rule_name: &str, keyword: &str) -> bool {
    let tokens: Vec<&str> = rule_name.split(['_', '-', ' ']).filter(|t| !t.is_empty()).collect();
    let mut start = 0;
    for word in keyword.split('_').filter(|w| !w.is_empty()) {
        match tokens[start..].iter().position(|t| t.starts_with(word)) {
            Some(offset) => start += offset + 1,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_worst_last() {
        assert!(ConflictSeverity::Critical > ConflictSeverity::Severe);
        assert!(ConflictSeverity::Severe > ConflictSeverity::Moderate);
        assert!(ConflictSeverity::Moderate > ConflictSeverity::Minor);
        assert_eq!(ConflictSeverity::Severe.to_string(), "severe");
    }

    #[test]
    fn known_conflicts_match_in_either_order() {
        let kb = RuleKnowledge::default();
        let hit = kb
            .known_conflict("information_completeness", "content_reduction")
            .unwrap();
        assert_eq!(hit.severity, ConflictSeverity::Severe);
        assert_eq!(hit.strategy, "prioritize_completeness");
        assert!(kb.known_conflict("spelling", "comma_splice").is_none());
    }

    #[test]
    fn categories_come_from_rule_name_fragments() {
        let kb = RuleKnowledge::default();
        assert_eq!(kb.category_of("passive_voice"), Some("style"));
        assert_eq!(kb.category_of("comma_splice"), Some("punctuation"));
        assert_eq!(kb.category_of("zzz"), None);
    }

    #[test]
    fn fragments_inside_longer_words_do_not_categorise() {
        let kb = RuleKnowledge::default();
        assert_eq!(kb.category_of("interactive_example"), None);
        assert_eq!(kb.category_of("adverb_placement"), None);
        assert_eq!(kb.category_of("verb_form"), Some("grammar"));
        assert!(kb.is_tense_rule("past_tense"));
        assert!(!kb.is_tense_rule("intense_wording"));
    }

    #[test]
    fn token_prefix_matching() {
        assert!(matches_token_prefixes("add_content_section", "add_content"));
        assert!(matches_token_prefixes("additional_contents", "add_content"));
        assert!(!matches_token_prefixes("content_add", "add_content"));
        assert!(!matches_token_prefixes("remove_content", "add_content"));
    }

    #[test]
    fn every_severity_has_strategies() {
        let kb = RuleKnowledge::default();
        for severity in [
            ConflictSeverity::Minor,
            ConflictSeverity::Moderate,
            ConflictSeverity::Severe,
            ConflictSeverity::Critical,
        ] {
            assert!(!kb.strategies_for(severity).is_empty());
        }
        assert_eq!(kb.strategies_for(ConflictSeverity::Critical)[0], "halt_processing");
    }
}
