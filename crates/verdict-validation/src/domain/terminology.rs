//! Whether the flagged word fits the domain's vocabulary.

use verdict_core::models::ValidationEvidence;

use crate::knowledge::{CompiledDomainPatterns, DomainProfile};
use crate::text::{clamp_unit, ratio, words};

pub const EVIDENCE_TYPE: &str = "domain_terminology";

const INAPPROPRIATE: f64 = 0.2;
const DOMAIN_PATTERN: f64 = 0.9;
const NEUTRAL: f64 = 0.6;
const PRECISE_SUFFIXES: [&str; 6] = ["tion", "ment", "ity", "ism", "ology", "ance"];

#[derive(Debug, Clone, PartialEq)]
pub struct TerminologyAnalysis {
    pub term: String,
    pub appropriateness: f64,
    pub inappropriate_category: Option<String>,
    pub precision: f64,
    /// Share of domain-patterned words that belong to this domain rather than another.
    pub consistency: f64,
    pub suggestions: Vec<String>,
    pub confidence: f64,
}

/// First word of `error_text`, or the word covering `position` when the text is empty.
pub fn flagged_term(text: &str, position: usize, error_text: &str) -> String {
    if let Some(first) = words(error_text).into_iter().next() {
        return first;
    }
    let chars: Vec<char> = text.chars().collect();
    let position = position.min(chars.len());
    let is_word = |c: &char| c.is_alphanumeric() || *c == '\'';
    let start = chars[..position]
        .iter()
        .rposition(|c| !is_word(c))
        .map_or(0, |i| i + 1);
    let end = chars[position..]
        .iter()
        .position(|c| !is_word(c))
        .map_or(chars.len(), |i| position + i);
    chars[start..end].iter().collect::<String>().to_lowercase()
}

fn precision_of(original: &str) -> f64 {
    let lower = original.to_lowercase();
    let mut precision: f64 = 0.5;
    if lower.chars().count() >= 8 {
        precision += 0.2;
    }
    if PRECISE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        precision += 0.1;
    }
    if original.chars().count() >= 2 && original.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        precision += 0.1;
    }
    clamp_unit(precision)
}

pub fn analyze(
    text: &str,
    term: &str,
    domain: &str,
    profile: Option<&DomainProfile>,
    patterns: &CompiledDomainPatterns,
) -> TerminologyAnalysis {
    let lower = term.to_lowercase();
    let inappropriate_category = profile
        .and_then(|p| p.inappropriate_category(&lower))
        .map(str::to_string);
    let appropriateness = if inappropriate_category.is_some() {
        INAPPROPRIATE
    } else if patterns.matches_word(domain, &lower) {
        DOMAIN_PATTERN
    } else {
        NEUTRAL
    };

    let mut in_domain = 0;
    let mut elsewhere = 0;
    for word in words(text) {
        if patterns.matches_word(domain, &word) {
            in_domain += 1;
        } else if patterns.domains().any(|d| d != domain && patterns.matches_word(d, &word)) {
            elsewhere += 1;
        }
    }
    let consistency = if in_domain + elsewhere == 0 {
        0.5
    } else {
        ratio(in_domain, in_domain + elsewhere)
    };

    let suggestions = profile
        .and_then(|p| p.synonyms.get(&lower))
        .cloned()
        .unwrap_or_default();

    let precision = precision_of(term);
    let confidence = clamp_unit(0.5 * appropriateness + 0.2 * precision + 0.3 * consistency);

    TerminologyAnalysis {
        term: lower,
        appropriateness,
        inappropriate_category,
        precision,
        consistency,
        suggestions,
        confidence,
    }
}

impl TerminologyAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        let verdict = match (&self.inappropriate_category, self.appropriateness) {
            (Some(category), _) => format!("'{}' is {category} for this domain", self.term),
            (None, a) if a >= DOMAIN_PATTERN => format!("'{}' is established domain terminology", self.term),
            _ => format!("'{}' is neutral vocabulary for this domain", self.term),
        };
        ValidationEvidence::new(EVIDENCE_TYPE, self.confidence, verdict)
            .with_data("term", self.term.as_str())
            .with_data("appropriateness", self.appropriateness)
            .with_data("precision", self.precision)
            .with_data("terminology_consistency", self.consistency)
            .with_data("suggestions", self.suggestions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::DomainKnowledge;

    fn run(text: &str, term: &str, domain: &str) -> TerminologyAnalysis {
        let kb = DomainKnowledge::default();
        let patterns = CompiledDomainPatterns::compile(&kb).unwrap();
        analyze(text, term, domain, kb.profile(domain), &patterns)
    }

    #[test]
    fn flagged_term_prefers_error_text() {
        assert_eq!(flagged_term("a b", 0, "Features here"), "features");
        assert_eq!(flagged_term("The quick fox", 6, ""), "quick");
        assert_eq!(flagged_term("abc", 99, ""), "abc");
        assert_eq!(flagged_term("", 0, ""), "");
    }

    #[test]
    fn casual_words_are_inappropriate_in_technical_text() {
        let a = run("Install the stuff on the server.", "stuff", "technical");
        assert_eq!(a.appropriateness, INAPPROPRIATE);
        assert_eq!(a.inappropriate_category.as_deref(), Some("casual"));
    }

    #[test]
    fn domain_terms_and_synonyms() {
        let a = run("Restart the server to use the new cache.", "server", "technical");
        assert_eq!(a.appropriateness, DOMAIN_PATTERN);
        assert_eq!(a.consistency, 1.0);

        let b = run("Restart the server to use the new cache.", "use", "technical");
        assert_eq!(b.suggestions, vec!["utilize".to_string(), "employ".to_string()]);
    }

    #[test]
    fn acronyms_and_long_words_are_precise() {
        assert!(precision_of("API") > precision_of("api"));
        assert!(precision_of("configuration") > precision_of("thing"));
    }
}
