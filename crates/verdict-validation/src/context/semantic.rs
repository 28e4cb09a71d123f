//! Semantic field consistency, register and terminology precision of the context window.

use std::collections::BTreeMap;

use verdict_core::models::{Token, ValidationEvidence};

use crate::knowledge::DiscourseKnowledge;
use crate::text::{clamp_unit, mean, ratio};

pub const EVIDENCE_TYPE: &str = "semantic_consistency";

/// Context lemmas the error token is compared against for anomaly detection.
const ANOMALY_NEIGHBOURS: usize = 5;
const AFFIX_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAnalysis {
    pub dominant_field: String,
    pub field_counts: BTreeMap<String, usize>,
    pub consistency: f64,
    pub conflicting_terms: Vec<String>,
    pub domain_coherence: f64,
    pub register_consistency: f64,
    pub terminology_precision: f64,
    pub anomaly: bool,
    pub confidence: f64,
}

/// Alphabetic non-stopwords, in document order.
fn content_words<'a>(tokens: &[&'a Token]) -> Vec<&'a Token> {
    tokens
        .iter()
        .copied()
        .filter(|t| !t.is_punct && !t.is_stop && t.is_alpha())
        .collect()
}

fn field_hits<'a>(word: &Token, knowledge: &'a DiscourseKnowledge) -> Vec<&'a str> {
    let lower = word.lower();
    let lemma = word.lemma.to_lowercase();
    knowledge.fields_of(&[lower.as_str(), lemma.as_str()])
}

/// Skewed formal/informal ratios are consistent; an even mix is not.
pub fn register_consistency(formal: usize, informal: usize) -> f64 {
    let total = formal + informal;
    if total == 0 {
        return 0.8;
    }
    let r = ratio(formal, total);
    if !(0.2..=0.8).contains(&r) {
        0.9
    } else if (0.4..=0.6).contains(&r) {
        0.4
    } else {
        0.7
    }
}

fn shares_affix(a: &str, b: &str) -> bool {
    let prefix = |s: &str| s.chars().take(AFFIX_LEN).collect::<String>();
    let suffix = |s: &str| {
        let chars: Vec<char> = s.chars().collect();
        chars[chars.len().saturating_sub(AFFIX_LEN)..].iter().collect::<String>()
    };
    a.chars().count() >= AFFIX_LEN
        && b.chars().count() >= AFFIX_LEN
        && (prefix(a) == prefix(b) || suffix(a) == suffix(b))
}

/// `window` holds every token of the context sentences; `declared` is the
/// caller's domain or content type, if any.
pub fn analyze(
    window: &[&Token],
    error_token: &Token,
    declared: Option<&str>,
    knowledge: &DiscourseKnowledge,
) -> SemanticAnalysis {
    let content = content_words(window);

    let mut field_counts: BTreeMap<String, usize> = BTreeMap::new();
    for word in &content {
        for field in field_hits(word, knowledge) {
            *field_counts.entry(field.to_string()).or_default() += 1;
        }
    }
    // Highest count wins; ties go to the first field in table order.
    let dominant_field = field_counts
        .iter()
        .fold(None::<(&String, usize)>, |best, (field, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((field, n)),
        })
        .map(|(field, _)| field.clone())
        .unwrap_or_else(|| knowledge.default_field.clone());

    let matching = content
        .iter()
        .filter(|w| field_hits(w, knowledge).contains(&dominant_field.as_str()))
        .count();
    let consistency = clamp_unit(ratio(matching, content.len()) * 3.0);

    let mut conflicting_terms: Vec<String> = content
        .iter()
        .filter(|w| {
            let fields = field_hits(w, knowledge);
            !fields.is_empty() && !fields.contains(&dominant_field.as_str())
        })
        .map(|w| w.lower())
        .collect();
    conflicting_terms.dedup();

    let domain_coherence = match declared {
        None => 0.7,
        Some(d) if d.eq_ignore_ascii_case(&dominant_field) => 1.0,
        Some(d) if field_counts.contains_key(&d.to_lowercase()) => 0.8,
        Some(_) => 0.5,
    };

    let lowers: Vec<String> = window.iter().map(|t| t.lower()).collect();
    let formal = lowers.iter().filter(|w| knowledge.formal_words.contains(w)).count();
    let informal = lowers.iter().filter(|w| knowledge.informal_words.contains(w)).count();
    let register = register_consistency(formal, informal);

    let word_precision: Vec<f64> = content
        .iter()
        .map(|w| if w.char_len() >= 6 { 0.8 } else { 0.5 })
        .collect();
    let field_precision = knowledge.precision_for(&dominant_field);
    let terminology_precision = if word_precision.is_empty() {
        0.5
    } else {
        clamp_unit(mean(&word_precision) * (0.5 + field_precision / 2.0))
    };

    let anomaly = is_anomalous(error_token, &content, knowledge);

    let confidence = clamp_unit(
        0.3 * consistency
            + 0.2 * domain_coherence
            + 0.2 * register
            + 0.2 * terminology_precision
            + if anomaly { 0.0 } else { 0.1 },
    );

    SemanticAnalysis {
        dominant_field,
        field_counts,
        consistency,
        conflicting_terms,
        domain_coherence,
        register_consistency: register,
        terminology_precision,
        anomaly,
        confidence,
    }
}

/// A content word unrelated by affix or field to its first few neighbours.
fn is_anomalous(error_token: &Token, content: &[&Token], knowledge: &DiscourseKnowledge) -> bool {
    if error_token.is_stop || error_token.is_punct || !error_token.is_alpha() {
        return false;
    }
    let lemma = error_token.lemma.to_lowercase();
    let own_fields = field_hits(error_token, knowledge);
    let neighbours: Vec<&&Token> = content
        .iter()
        .filter(|t| t.index != error_token.index)
        .take(ANOMALY_NEIGHBOURS)
        .collect();
    if neighbours.is_empty() {
        return false;
    }
    !neighbours.iter().any(|t| {
        let other = t.lemma.to_lowercase();
        shares_affix(&lemma, &other)
            || field_hits(t, knowledge).iter().any(|f| own_fields.contains(f))
    })
}

impl SemanticAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "dominant semantic field '{}' (consistency {:.2}){}",
                self.dominant_field,
                self.consistency,
                if self.anomaly { ", error word is semantically isolated" } else { "" }
            ),
        )
        .with_data("dominant_field", self.dominant_field.as_str())
        .with_data("field_consistency", self.consistency)
        .with_data("conflicting_terms", self.conflicting_terms.clone())
        .with_data("domain_coherence", self.domain_coherence)
        .with_data("register_consistency", self.register_consistency)
        .with_data("terminology_precision", self.terminology_precision)
        .with_data("semantic_anomaly", self.anomaly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_low_for_even_mixes() {
        assert_eq!(register_consistency(0, 0), 0.8);
        assert_eq!(register_consistency(5, 0), 0.9);
        assert_eq!(register_consistency(1, 1), 0.4);
        assert_eq!(register_consistency(3, 7), 0.7);
    }

    #[test]
    fn affixes() {
        assert!(shares_affix("configure", "configuration"));
        assert!(shares_affix("walking", "talking"));
        assert!(!shares_affix("cat", "dog"));
        assert!(!shares_affix("ab", "ab"));
    }
}
