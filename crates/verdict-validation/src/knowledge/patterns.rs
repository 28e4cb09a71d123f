//! Regex sets compiled once from knowledge tables at validator construction.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use verdict_core::errors::{ValidationError, VerdictResult};

use super::discourse::NegativeEvidenceKnowledge;
use super::domains::DomainKnowledge;
use super::rules::{ConflictPattern, ConflictSeverity, RuleKnowledge};

fn compile(entry: &str, pattern: &str) -> VerdictResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ValidationError::InvalidKnowledge {
            entry: entry.to_string(),
            reason: e.to_string(),
        })
}

/// Domain keyword patterns, per domain.
#[derive(Debug, Clone)]
pub struct CompiledDomainPatterns {
    domains: BTreeMap<String, Vec<Regex>>,
}

impl CompiledDomainPatterns {
    pub fn compile(knowledge: &DomainKnowledge) -> VerdictResult<Self> {
        let mut domains = BTreeMap::new();
        for (name, profile) in &knowledge.domains {
            let compiled = profile
                .patterns
                .iter()
                .enumerate()
                .map(|(i, p)| compile(&format!("domains.{name}.patterns[{i}]"), p))
                .collect::<VerdictResult<Vec<_>>>()?;
            domains.insert(name.clone(), compiled);
        }
        Ok(Self { domains })
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// Total pattern matches of `domain` in `text`.
    pub fn count_matches(&self, domain: &str, text: &str) -> usize {
        self.domains
            .get(domain)
            .map(|set| set.iter().map(|re| re.find_iter(text).count()).sum())
            .unwrap_or(0)
    }

    /// Whether a single word matches any pattern of `domain`.
    pub fn matches_word(&self, domain: &str, word: &str) -> bool {
        self.domains
            .get(domain)
            .is_some_and(|set| set.iter().any(|re| re.is_match(word)))
    }
}

/// One compiled `ConflictPattern`.
#[derive(Debug, Clone)]
pub struct CompiledPair {
    pub name: String,
    pub severity: ConflictSeverity,
    pub description: String,
    left: Regex,
    right: Regex,
}

impl CompiledPair {
    fn new(section: &str, index: usize, source: &ConflictPattern) -> VerdictResult<Self> {
        Ok(Self {
            name: source.name.clone(),
            severity: source.severity,
            description: source.description.clone(),
            left: compile(&format!("rules.{section}[{index}].left"), &source.left)?,
            right: compile(&format!("rules.{section}[{index}].right"), &source.right)?,
        })
    }

    /// Matches when one name fits `left` and the other `right`, in either order.
    pub fn matches(&self, first: &str, second: &str) -> bool {
        (self.left.is_match(first) && self.right.is_match(second))
            || (self.left.is_match(second) && self.right.is_match(first))
    }
}

/// Conflict and contradiction patterns over rule names.
#[derive(Debug, Clone)]
pub struct CompiledConflictPatterns {
    pub conflicts: Vec<CompiledPair>,
    pub contradictions: Vec<CompiledPair>,
}

impl CompiledConflictPatterns {
    pub fn compile(knowledge: &RuleKnowledge) -> VerdictResult<Self> {
        let conflicts = knowledge
            .conflict_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| CompiledPair::new("conflict_patterns", i, p))
            .collect::<VerdictResult<Vec<_>>>()?;
        let contradictions = knowledge
            .contradiction_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| CompiledPair::new("contradiction_patterns", i, p))
            .collect::<VerdictResult<Vec<_>>>()?;
        Ok(Self {
            conflicts,
            contradictions,
        })
    }

    pub fn conflicts_between<'a>(
        &'a self,
        first: &'a str,
        second: &'a str,
    ) -> impl Iterator<Item = &'a CompiledPair> + 'a {
        self.conflicts.iter().filter(move |p| p.matches(first, second))
    }

    pub fn contradiction_between(&self, first: &str, second: &str) -> Option<&CompiledPair> {
        self.contradictions.iter().find(|p| p.matches(first, second))
    }
}

/// Code-syntax and legacy-marker scanners for negative evidence.
#[derive(Debug, Clone)]
pub struct CompiledSyntaxPatterns {
    syntax: Option<Regex>,
    legacy: Option<Regex>,
}

impl CompiledSyntaxPatterns {
    pub fn compile(knowledge: &NegativeEvidenceKnowledge) -> VerdictResult<Self> {
        let syntax = alternation(&knowledge.technical_syntax, false)
            .map(|p| compile("discourse.negative.technical_syntax", &p))
            .transpose()?;
        let legacy = alternation(&knowledge.legacy_markers, true)
            .map(|p| compile("discourse.negative.legacy_markers", &p))
            .transpose()?;
        Ok(Self { syntax, legacy })
    }

    /// Character spans `(start, end)` of technical syntax tokens in `text`.
    pub fn syntax_spans(&self, text: &str) -> Vec<(usize, usize)> {
        spans(self.syntax.as_ref(), text)
    }

    /// Character spans of legacy/deprecation markers in `text`, with the matched word.
    pub fn legacy_spans(&self, text: &str) -> Vec<(usize, usize, String)> {
        let Some(re) = self.legacy.as_ref() else {
            return Vec::new();
        };
        re.find_iter(text)
            .map(|m| {
                let start = text[..m.start()].chars().count();
                let end = start + m.as_str().chars().count();
                (start, end, m.as_str().to_lowercase())
            })
            .collect()
    }
}

fn alternation(literals: &[String], word_bounded: bool) -> Option<String> {
    let escaped: Vec<String> = literals
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| regex::escape(l))
        .collect();
    if escaped.is_empty() {
        return None;
    }
    let body = escaped.join("|");
    Some(if word_bounded {
        format!(r"\b(?:{body})\b")
    } else {
        format!("(?:{body})")
    })
}

fn spans(re: Option<&Regex>, text: &str) -> Vec<(usize, usize)> {
    let Some(re) = re else {
        return Vec::new();
    };
    re.find_iter(text)
        .map(|m| {
            let start = text[..m.start()].chars().count();
            (start, start + m.as_str().chars().count())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    #[test]
    fn default_knowledge_compiles() {
        let kb = KnowledgeBase::default();
        assert!(CompiledDomainPatterns::compile(&kb.domains).is_ok());
        assert!(CompiledConflictPatterns::compile(&kb.rules).is_ok());
        assert!(CompiledSyntaxPatterns::compile(&kb.discourse.negative).is_ok());
    }

    #[test]
    fn invalid_pattern_names_its_entry() {
        let mut kb = KnowledgeBase::default();
        kb.rules.conflict_patterns[0].left = "(unclosed".to_string();
        let err = CompiledConflictPatterns::compile(&kb.rules).unwrap_err();
        match err {
            ValidationError::InvalidKnowledge { entry, .. } => {
                assert_eq!(entry, "rules.conflict_patterns[0].left");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn creative_text_matches_creative_patterns() {
        let kb = KnowledgeBase::default();
        let compiled = CompiledDomainPatterns::compile(&kb.domains).unwrap();
        let text = "The magical fairy tale features enchanted creatures in mystical forest settings.";
        assert!(compiled.count_matches("creative", text) >= 5);
        assert_eq!(compiled.count_matches("business", text), 0);
        assert!(compiled.matches_word("technical", "API"));
    }

    #[test]
    fn syntax_spans_are_character_offsets() {
        let kb = KnowledgeBase::default();
        let compiled = CompiledSyntaxPatterns::compile(&kb.discourse.negative).unwrap();
        assert_eq!(compiled.syntax_spans("é => x"), vec![(2, 4)]);
        let legacy = compiled.legacy_spans("This API is Deprecated now.");
        assert_eq!(legacy, vec![(12, 22, "deprecated".to_string())]);
    }

    #[test]
    fn voice_conflict_matches_either_order() {
        let kb = KnowledgeBase::default();
        let compiled = CompiledConflictPatterns::compile(&kb.rules).unwrap();
        let names: Vec<&str> = compiled
            .conflicts_between("active_voice", "passive_voice")
            .map(|p| p.name.as_str())
            .collect();
        assert!(names.contains(&"voice_conflict"));
    }
}
