//! Discourse, register and negative-evidence tables for the context validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{list, scores, table};

/// Signals that a flagged span is quoted, legacy or code and should be left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegativeEvidenceKnowledge {
    /// Characters scanned on each side of the error.
    pub scan_window: usize,
    pub quote_confidence: f64,
    pub legacy_confidence: f64,
    /// Legacy markers must sit within this many characters of the error.
    pub legacy_window: usize,
    pub inline_code_confidence: f64,
    pub code_fence_confidence: f64,
    pub technical_syntax_confidence: f64,
    /// Syntax tokens must sit within this many characters of the error.
    pub technical_syntax_window: usize,
    pub quote_chars: Vec<String>,
    pub legacy_markers: Vec<String>,
    /// Literal character sequences that only appear in code or markup.
    pub technical_syntax: Vec<String>,
}

impl Default for NegativeEvidenceKnowledge {
    fn default() -> Self {
        Self {
            scan_window: 100,
            quote_confidence: 0.9,
            legacy_confidence: 0.8,
            legacy_window: 50,
            inline_code_confidence: 0.95,
            code_fence_confidence: 1.0,
            technical_syntax_confidence: 0.7,
            technical_syntax_window: 20,
            quote_chars: list(&["\"", "'", "`", "\u{201c}", "\u{2018}"]),
            legacy_markers: list(&[
                "legacy",
                "deprecated",
                "historically",
                "formerly",
                "obsolete",
                "archaic",
                "outdated",
                "previously",
                "old-style",
                "superseded",
            ]),
            technical_syntax: list(&[
                "</", "/>", "=>", "->", "{{", "}}", "::", "&&", "||", "();", "==", "!=", "[]", "${",
            ]),
        }
    }
}

impl NegativeEvidenceKnowledge {
    /// Closing quote for an opening one; straight quotes close themselves.
    pub fn closing_quote(open: char) -> char {
        match open {
            '\u{201c}' => '\u{201d}',
            '\u{2018}' => '\u{2019}',
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscourseKnowledge {
    /// Fallback semantic field when no field keyword matches.
    pub default_field: String,
    pub formal_words: Vec<String>,
    pub informal_words: Vec<String>,
    pub slang: Vec<String>,
    /// Chat abbreviations (`u`, `lol`, `btw`).
    pub text_speak: Vec<String>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    /// personal, possessive, demonstrative, relative, indefinite, reflexive.
    pub pronoun_categories: BTreeMap<String, Vec<String>>,
    /// addition, contrast, cause_effect, sequence, example, conclusion.
    pub discourse_markers: BTreeMap<String, Vec<String>>,
    /// Discourse structure implied by a dominant marker category.
    pub marker_structures: BTreeMap<String, String>,
    pub semantic_fields: BTreeMap<String, Vec<String>>,
    /// Expected terminology precision per semantic field.
    pub field_precision: BTreeMap<String, f64>,
    /// Expected formality (`formal`, `neutral`, `informal`) per content type.
    pub expected_formality: BTreeMap<String, String>,
    pub negative: NegativeEvidenceKnowledge,
}

impl Default for DiscourseKnowledge {
    fn default() -> Self {
        let marker_structures = [
            ("addition", "enumerative"),
            ("contrast", "comparative"),
            ("cause_effect", "causal"),
            ("sequence", "temporal"),
            ("example", "explanatory"),
            ("conclusion", "argumentative"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let expected_formality = [
            ("technical", "formal"),
            ("academic", "formal"),
            ("legal", "formal"),
            ("business", "formal"),
            ("documentation", "formal"),
            ("procedural", "neutral"),
            ("narrative", "neutral"),
            ("marketing", "neutral"),
            ("general", "neutral"),
            ("creative", "informal"),
            ("blog", "informal"),
            ("social", "informal"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default_field: "general".to_string(),
            formal_words: list(&[
                "therefore", "furthermore", "moreover", "consequently", "nevertheless", "subsequently",
                "accordingly", "hence", "thus", "whereas", "comprehensive", "utilize", "facilitate",
                "demonstrate", "indicate", "establish", "ensure", "obtain", "require", "additional",
                "regarding", "sufficient", "approximately", "numerous", "commence",
            ]),
            informal_words: list(&[
                "gonna", "wanna", "gotta", "kinda", "sorta", "yeah", "ok", "okay", "stuff", "things",
                "cool", "awesome", "pretty", "really", "basically", "totally", "super", "guys", "oh",
                "wow", "hey", "lots", "tons", "nope", "yep",
            ]),
            slang: list(&[
                "gonna", "wanna", "gotta", "ain't", "y'all", "dude", "lit", "sick", "legit", "nah",
                "bro", "kinda", "sorta", "awesome",
            ]),
            text_speak: list(&[
                "u", "ur", "r", "lol", "omg", "btw", "imo", "imho", "tbh", "idk", "thx", "pls", "plz",
                "b4", "gr8", "brb",
            ]),
            positive_words: list(&[
                "good", "great", "excellent", "effective", "efficient", "successful", "improve",
                "improved", "benefit", "helpful", "clear", "comprehensive", "reliable", "robust",
                "valuable", "positive", "easy", "best", "awesome", "thoroughly",
            ]),
            negative_words: list(&[
                "bad", "poor", "fail", "failed", "failure", "error", "problem", "issue", "wrong",
                "difficult", "broken", "slow", "negative", "worse", "worst", "unfortunately", "risk",
                "crash", "bug", "terrible",
            ]),
            pronoun_categories: table(&[
                ("personal", &["i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them"]),
                ("possessive", &["my", "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs"]),
                ("demonstrative", &["this", "that", "these", "those"]),
                ("relative", &["who", "whom", "whose", "which", "that"]),
                ("indefinite", &["anyone", "everyone", "someone", "nobody", "something", "anything", "everything", "nothing", "each", "all", "some", "none"]),
                ("reflexive", &["myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves"]),
            ]),
            discourse_markers: table(&[
                ("addition", &["also", "furthermore", "moreover", "additionally", "besides", "and", "too"]),
                ("contrast", &["however", "but", "although", "nevertheless", "whereas", "yet", "conversely", "instead"]),
                ("cause_effect", &["because", "therefore", "thus", "consequently", "hence", "so", "since", "accordingly"]),
                ("sequence", &["first", "second", "third", "then", "next", "finally", "afterwards", "subsequently", "before", "after"]),
                ("example", &["for example", "for instance", "such as", "namely", "specifically", "e.g."]),
                ("conclusion", &["in conclusion", "overall", "to summarize", "in summary", "ultimately", "in short"]),
            ]),
            marker_structures,
            semantic_fields: table(&[
                ("technical", &[
                    "system", "software", "code", "function", "data", "algorithm", "server", "api",
                    "database", "configuration", "config", "implementation", "interface", "module",
                    "network", "protocol", "parameter", "deploy", "compile", "debug", "documentation",
                    "cache", "query", "thread", "memory", "performance", "behavior", "retries",
                ]),
                ("business", &[
                    "market", "revenue", "customer", "client", "strategy", "profit", "sales", "budget",
                    "stakeholder", "investment", "growth", "roi", "quarter", "management", "product",
                    "company", "team", "meeting", "proposal",
                ]),
                ("academic", &[
                    "research", "study", "analysis", "hypothesis", "theory", "evidence", "methodology",
                    "literature", "findings", "significant", "experiment", "data", "conclusion",
                    "framework", "scholar", "journal", "topics",
                ]),
                ("narrative", &[
                    "story", "character", "tale", "journey", "adventure", "forest", "castle", "hero",
                    "magic", "magical", "creature", "creatures", "dream", "night", "village", "kingdom",
                    "enchanted", "mystical", "fairy",
                ]),
                ("instructional", &[
                    "step", "click", "select", "enter", "install", "open", "follow", "configure",
                    "tutorial", "guide", "instruction", "procedure", "example", "run", "setup", "covers",
                ]),
            ]),
            field_precision: scores(&[
                ("technical", 0.9),
                ("academic", 0.85),
                ("business", 0.7),
                ("instructional", 0.75),
                ("narrative", 0.4),
                ("general", 0.5),
            ]),
            expected_formality,
            negative: NegativeEvidenceKnowledge::default(),
        }
    }
}

impl DiscourseKnowledge {
    /// Pronoun category for a lowercased word, first match in category order.
    pub fn pronoun_category(&self, lower: &str) -> Option<&str> {
        self.pronoun_categories
            .iter()
            .find(|(_, words)| words.iter().any(|w| w == lower))
            .map(|(category, _)| category.as_str())
    }

    /// Fields whose keyword set contains any of `words`, in table order.
    pub fn fields_of(&self, words: &[&str]) -> Vec<&str> {
        self.semantic_fields
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| words.contains(&k.as_str())))
            .map(|(field, _)| field.as_str())
            .collect()
    }

    pub fn precision_for(&self, field: &str) -> f64 {
        self.field_precision.get(field).copied().unwrap_or(0.5)
    }

    pub fn structure_for(&self, marker_category: &str) -> &str {
        self.marker_structures
            .get(marker_category)
            .map(String::as_str)
            .unwrap_or("mixed")
    }

    pub fn expected_formality_for(&self, content_type: &str) -> Option<&str> {
        self.expected_formality.get(content_type).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_pronoun_categories_and_marker_families() {
        let kb = DiscourseKnowledge::default();
        assert_eq!(kb.pronoun_categories.len(), 6);
        assert_eq!(kb.discourse_markers.len(), 6);
        assert_eq!(kb.pronoun_category("it"), Some("personal"));
        assert_eq!(kb.pronoun_category("themselves"), Some("reflexive"));
        assert_eq!(kb.pronoun_category("documentation"), None);
    }

    #[test]
    fn every_marker_category_has_a_structure() {
        let kb = DiscourseKnowledge::default();
        for category in kb.discourse_markers.keys() {
            assert_ne!(kb.structure_for(category), "mixed", "{category}");
        }
        assert_eq!(kb.structure_for("unknown"), "mixed");
    }

    #[test]
    fn curly_quotes_close_with_their_pair() {
        assert_eq!(NegativeEvidenceKnowledge::closing_quote('\u{201c}'), '\u{201d}');
        assert_eq!(NegativeEvidenceKnowledge::closing_quote('`'), '`');
    }
}
