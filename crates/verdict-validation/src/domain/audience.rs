//! Fit of the text's complexity and jargon to its target audience.

use verdict_core::models::ValidationEvidence;

use crate::knowledge::{CompiledDomainPatterns, DomainKnowledge, DomainProfile};
use crate::text::{clamp_unit, mean, ratio, sentences, syllables, words};

pub const EVIDENCE_TYPE: &str = "audience_appropriateness";

/// Domain whose patterns count as technical terms.
const JARGON_DOMAIN: &str = "technical";
const EXPERT_LEVEL: f64 = 0.6;
const NOVICE_LEVEL: f64 = 0.5;
const DEFAULT_TECHNICAL_LEVEL: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LanguageComplexity {
    Simple,
    Moderate,
    Complex,
    HighlyComplex,
}

impl LanguageComplexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::HighlyComplex => "highly_complex",
        }
    }

    /// From average syllables per word and average words per sentence.
    pub fn classify(syllables_per_word: f64, words_per_sentence: f64) -> Self {
        if syllables_per_word < 1.4 && words_per_sentence < 12.0 {
            Self::Simple
        } else if syllables_per_word < 1.7 && words_per_sentence < 20.0 {
            Self::Moderate
        } else if syllables_per_word < 2.0 && words_per_sentence < 30.0 {
            Self::Complex
        } else {
            Self::HighlyComplex
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudienceAnalysis {
    pub audience: String,
    pub technical_level: f64,
    pub technical_terms: usize,
    pub technical_density: f64,
    pub accessibility: f64,
    pub technical_level_match: bool,
    pub complexity: LanguageComplexity,
    pub assumed_knowledge: Vec<String>,
    pub barriers: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

pub fn target_audience<'a>(
    rule_type: &str,
    domain: &str,
    profile: Option<&'a DomainProfile>,
    knowledge: &'a DomainKnowledge,
) -> &'a str {
    knowledge
        .audience_override(rule_type, domain)
        .or_else(|| profile.map(|p| p.audience.as_str()))
        .unwrap_or("general_readers")
}

pub fn analyze(
    text: &str,
    rule_type: &str,
    domain: &str,
    knowledge: &DomainKnowledge,
    patterns: &CompiledDomainPatterns,
) -> AudienceAnalysis {
    let profile = knowledge.profile(domain);
    let audience = target_audience(rule_type, domain, profile, knowledge);
    let audience_profile = knowledge.audiences.get(audience);
    let technical_level = audience_profile.map_or(DEFAULT_TECHNICAL_LEVEL, |a| a.technical_level);
    let expert = technical_level >= EXPERT_LEVEL;

    let all_words = words(text);
    let technical_terms = all_words
        .iter()
        .filter(|w| patterns.matches_word(JARGON_DOMAIN, w))
        .count();
    let technical_density = ratio(technical_terms, all_words.len());
    let saturation = (technical_density * 5.0).min(1.0);
    let accessibility = if expert {
        0.6 + 0.4 * saturation
    } else {
        1.0 - 0.6 * saturation
    };
    let technical_level_match = if expert { technical_terms >= 1 } else { technical_terms <= 2 };

    let syllable_counts: Vec<f64> = all_words.iter().map(|w| syllables(w) as f64).collect();
    let sentence_lengths: Vec<f64> = sentences(text).iter().map(|s| words(s).len() as f64).collect();
    let complexity = LanguageComplexity::classify(mean(&syllable_counts), mean(&sentence_lengths));
    let complexity_fit = match complexity {
        LanguageComplexity::Simple => 0.9,
        LanguageComplexity::Moderate => 0.8,
        LanguageComplexity::Complex if expert => 0.8,
        LanguageComplexity::Complex => 0.6,
        LanguageComplexity::HighlyComplex => 0.3,
    };

    let mut barriers = Vec::new();
    let mut recommendations = Vec::new();
    if complexity == LanguageComplexity::HighlyComplex
        || (complexity == LanguageComplexity::Complex && technical_level < NOVICE_LEVEL)
    {
        barriers.push("overly_complex_language".to_string());
        recommendations.push("Simplify vocabulary and shorten sentences".to_string());
    }
    if technical_level < NOVICE_LEVEL && technical_terms > 2 {
        barriers.push("unexplained_technical_jargon".to_string());
        recommendations.push("Define technical terms or replace them with plain language".to_string());
    }
    if technical_level < NOVICE_LEVEL && technical_density > 0.15 {
        barriers.push("excessive_knowledge_assumptions".to_string());
        recommendations.push("Add background for readers new to the subject".to_string());
    }

    let confidence = clamp_unit(
        0.5 * accessibility + 0.3 * if technical_level_match { 1.0 } else { 0.4 } + 0.2 * complexity_fit,
    );

    AudienceAnalysis {
        audience: audience.to_string(),
        technical_level,
        technical_terms,
        technical_density,
        accessibility: clamp_unit(accessibility),
        technical_level_match,
        complexity,
        assumed_knowledge: audience_profile
            .map(|a| a.expected_knowledge.clone())
            .unwrap_or_default(),
        barriers,
        recommendations,
        confidence,
    }
}

impl AudienceAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} language for {} (accessibility {:.2})",
                self.complexity.as_str(),
                self.audience,
                self.accessibility
            ),
        )
        .with_data("target_audience", self.audience.as_str())
        .with_data("technical_level", self.technical_level)
        .with_data("technical_terms", self.technical_terms as u64)
        .with_data("content_accessibility", self.accessibility)
        .with_data("technical_level_match", self.technical_level_match)
        .with_data("language_complexity", self.complexity.as_str())
        .with_data("assumed_knowledge", self.assumed_knowledge.clone())
        .with_data("accessibility_barriers", self.barriers.clone())
        .with_data("recommendations", self.recommendations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, rule_type: &str, domain: &str) -> AudienceAnalysis {
        let kb = DomainKnowledge::default();
        let patterns = CompiledDomainPatterns::compile(&kb).unwrap();
        analyze(text, rule_type, domain, &kb, &patterns)
    }

    #[test]
    fn terminology_in_technical_text_targets_developers() {
        let a = run("Configure the server cache before you deploy.", "terminology", "technical");
        assert_eq!(a.audience, "developers");
        assert!(a.technical_level_match);
        assert!(a.barriers.is_empty());
    }

    #[test]
    fn jargon_is_a_barrier_for_general_readers() {
        let a = run(
            "The server queue caches database threads in the kernel runtime.",
            "style",
            "general",
        );
        assert_eq!(a.audience, "general_readers");
        assert!(a.barriers.contains(&"unexplained_technical_jargon".to_string()));
        assert!(!a.technical_level_match);
    }

    #[test]
    fn complexity_bands() {
        assert_eq!(LanguageComplexity::classify(1.2, 8.0), LanguageComplexity::Simple);
        assert_eq!(LanguageComplexity::classify(1.5, 15.0), LanguageComplexity::Moderate);
        assert_eq!(LanguageComplexity::classify(1.9, 25.0), LanguageComplexity::Complex);
        assert_eq!(LanguageComplexity::classify(2.5, 10.0), LanguageComplexity::HighlyComplex);
    }
}
