//! Tables for the morphological validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{list, scores, table};

/// One reading of an ambiguous word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Sense label (`financial`, `river`) or POS (`VERB`) for POS ambiguity.
    pub sense: String,
    /// Prior probability of this reading.
    pub prior: f64,
    /// Context words that point at this reading.
    pub indicators: Vec<String>,
}

fn reading(sense: &str, prior: f64, indicators: &[&str]) -> Interpretation {
    Interpretation {
        sense: sense.to_string(),
        prior,
        indicators: list(indicators),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyKnowledge {
    /// POS tags expected near a token of the keyed POS.
    pub expected_pos_context: BTreeMap<String, Vec<String>>,
    /// Dependency relation to syntactic role name.
    pub dependency_roles: BTreeMap<String, String>,
    /// Roles whose identification is unambiguous enough to earn a bonus.
    pub clear_roles: Vec<String>,
    /// Words with several meanings.
    pub homonyms: BTreeMap<String, Vec<Interpretation>>,
    /// Words that take several parts of speech.
    pub pos_ambiguous: BTreeMap<String, Vec<Interpretation>>,
    /// Morphological consistency prior per rule type.
    pub rule_consistency: BTreeMap<String, f64>,
    pub default_rule_consistency: f64,
}

impl Default for MorphologyKnowledge {
    fn default() -> Self {
        let dependency_roles = [
            ("nsubj", "subject"),
            ("nsubjpass", "passive_subject"),
            ("dobj", "direct_object"),
            ("iobj", "indirect_object"),
            ("pobj", "prepositional_object"),
            ("attr", "attribute"),
            ("acomp", "adjectival_complement"),
            ("amod", "adjectival_modifier"),
            ("advmod", "adverbial_modifier"),
            ("det", "determiner"),
            ("prep", "prepositional_modifier"),
            ("aux", "auxiliary"),
            ("auxpass", "passive_auxiliary"),
            ("compound", "compound_modifier"),
            ("conj", "conjunct"),
            ("cc", "coordinating_conjunction"),
            ("mark", "marker"),
            ("ROOT", "root"),
            ("poss", "possessive_modifier"),
            ("neg", "negation"),
            ("xcomp", "open_clausal_complement"),
            ("ccomp", "clausal_complement"),
            ("advcl", "adverbial_clause"),
            ("relcl", "relative_clause"),
            ("acl", "clausal_modifier"),
            ("nummod", "numeric_modifier"),
            ("punct", "punctuation"),
            ("case", "case_marker"),
            ("expl", "expletive"),
            ("intj", "interjection"),
        ]
        .into_iter()
        .map(|(rel, role)| (rel.to_string(), role.to_string()))
        .collect();

        let homonyms = [
            (
                "bank",
                vec![
                    reading("financial_institution", 0.6, &["money", "account", "loan", "deposit", "credit", "interest"]),
                    reading("river_side", 0.4, &["river", "water", "shore", "fishing", "stream"]),
                ],
            ),
            (
                "bark",
                vec![
                    reading("dog_sound", 0.55, &["dog", "loud", "noise", "puppy"]),
                    reading("tree_covering", 0.45, &["tree", "trunk", "wood", "forest"]),
                ],
            ),
            (
                "bat",
                vec![
                    reading("animal", 0.5, &["cave", "wings", "night", "fly"]),
                    reading("sports_equipment", 0.5, &["baseball", "ball", "swing", "cricket"]),
                ],
            ),
            (
                "spring",
                vec![
                    reading("season", 0.5, &["summer", "winter", "season", "flowers", "april"]),
                    reading("coil", 0.3, &["metal", "mechanism", "tension", "coil"]),
                    reading("water_source", 0.2, &["water", "well", "fresh"]),
                ],
            ),
            (
                "pitch",
                vec![
                    reading("sales_presentation", 0.5, &["investor", "sales", "deck", "proposal"]),
                    reading("sound_frequency", 0.3, &["sound", "tone", "music", "voice"]),
                    reading("sports_field", 0.2, &["football", "match", "players"]),
                ],
            ),
            (
                "cell",
                vec![
                    reading("biology", 0.45, &["tissue", "organism", "membrane", "biology"]),
                    reading("spreadsheet", 0.35, &["spreadsheet", "table", "column", "row"]),
                    reading("prison", 0.2, &["prison", "jail", "inmate"]),
                ],
            ),
            (
                "key",
                vec![
                    reading("important", 0.5, &["important", "main", "critical", "factor"]),
                    reading("lock", 0.3, &["door", "lock", "unlock"]),
                    reading("data_key", 0.2, &["value", "map", "dictionary", "database", "encryption"]),
                ],
            ),
            (
                "bug",
                vec![
                    reading("software_defect", 0.7, &["code", "fix", "software", "crash", "issue"]),
                    reading("insect", 0.3, &["insect", "garden", "crawl"]),
                ],
            ),
            (
                "mouse",
                vec![
                    reading("animal", 0.5, &["cheese", "cat", "small", "trap"]),
                    reading("input_device", 0.5, &["click", "computer", "cursor", "keyboard"]),
                ],
            ),
            (
                "light",
                vec![
                    reading("illumination", 0.6, &["lamp", "bright", "dark", "sun"]),
                    reading("weight", 0.4, &["heavy", "weight", "carry", "weigh"]),
                ],
            ),
        ]
        .into_iter()
        .map(|(word, readings)| (word.to_string(), readings))
        .collect();

        let pos_ambiguous = [
            (
                "run",
                vec![
                    reading("VERB", 0.6, &["quickly", "fast", "will", "to", "can"]),
                    reading("NOUN", 0.4, &["a", "the", "long", "morning", "test"]),
                ],
            ),
            (
                "record",
                vec![
                    reading("NOUN", 0.6, &["a", "the", "database", "new", "old"]),
                    reading("VERB", 0.4, &["to", "will", "should", "must"]),
                ],
            ),
            (
                "present",
                vec![
                    reading("ADJ", 0.4, &["is", "are", "was", "currently"]),
                    reading("VERB", 0.35, &["to", "will", "we", "they"]),
                    reading("NOUN", 0.25, &["a", "the", "birthday", "gift"]),
                ],
            ),
            (
                "object",
                vec![
                    reading("NOUN", 0.7, &["an", "the", "json", "class", "instance"]),
                    reading("VERB", 0.3, &["to", "may", "strongly"]),
                ],
            ),
            (
                "use",
                vec![
                    reading("VERB", 0.65, &["to", "we", "you", "should", "can"]),
                    reading("NOUN", 0.35, &["the", "of", "its", "in"]),
                ],
            ),
            (
                "change",
                vec![
                    reading("NOUN", 0.5, &["a", "the", "breaking", "this"]),
                    reading("VERB", 0.5, &["to", "will", "should", "please"]),
                ],
            ),
            (
                "process",
                vec![
                    reading("NOUN", 0.6, &["the", "a", "review", "approval"]),
                    reading("VERB", 0.4, &["to", "will", "we", "can"]),
                ],
            ),
            (
                "features",
                vec![
                    reading("NOUN", 0.55, &["new", "the", "key", "several"]),
                    reading("VERB", 0.45, &["it", "tale", "story", "film", "book"]),
                ],
            ),
            (
                "close",
                vec![
                    reading("VERB", 0.5, &["to", "please", "door", "window"]),
                    reading("ADJ", 0.5, &["very", "too", "to", "so"]),
                ],
            ),
            (
                "set",
                vec![
                    reading("VERB", 0.5, &["to", "will", "please"]),
                    reading("NOUN", 0.5, &["a", "the", "data", "of"]),
                ],
            ),
        ]
        .into_iter()
        .map(|(word, readings)| (word.to_string(), readings))
        .collect();

        Self {
            expected_pos_context: table(&[
                ("NOUN", &["DET", "ADJ", "VERB"]),
                ("PROPN", &["VERB", "ADP", "PROPN"]),
                ("VERB", &["NOUN", "PRON", "ADV", "AUX"]),
                ("ADJ", &["NOUN", "DET", "ADV", "AUX"]),
                ("ADV", &["VERB", "ADJ", "ADV"]),
                ("PRON", &["VERB", "AUX"]),
                ("DET", &["NOUN", "ADJ"]),
                ("ADP", &["NOUN", "DET", "PRON", "PROPN"]),
                ("AUX", &["VERB", "PRON", "NOUN"]),
            ]),
            dependency_roles,
            clear_roles: list(&["subject", "direct_object", "root", "passive_subject", "prepositional_object"]),
            homonyms,
            pos_ambiguous,
            rule_consistency: scores(&[
                ("grammar", 0.8),
                ("spelling", 0.7),
                ("style", 0.6),
                ("punctuation", 0.5),
            ]),
            default_rule_consistency: 0.5,
        }
    }
}

impl MorphologyKnowledge {
    /// Role for a dependency relation; unknown relations become `other_<rel>`.
    pub fn role_for(&self, relation: &str) -> String {
        self.dependency_roles
            .get(relation)
            .cloned()
            .unwrap_or_else(|| format!("other_{relation}"))
    }

    pub fn is_clear_role(&self, role: &str) -> bool {
        self.clear_roles.iter().any(|r| r == role)
    }

    pub fn rule_consistency(&self, rule_type: &str) -> f64 {
        self.rule_consistency
            .get(rule_type)
            .copied()
            .unwrap_or(self.default_rule_consistency)
    }
}
