//! Formality, tone and register fit of the context for the rule and content type.

use verdict_core::models::ValidationEvidence;

use crate::knowledge::DiscourseKnowledge;
use crate::text::{clamp_unit, contains_phrase, has_contraction, mean, variance, words};

pub const EVIDENCE_TYPE: &str = "contextual_appropriateness";

const COMPLEX_SENTENCE_WORDS: f64 = 25.0;
const SIMPLE_SENTENCE_WORDS: f64 = 6.0;
const MISMATCH_PENALTY: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    Formal,
    Informal,
    Neutral,
}

impl Formality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Informal => "informal",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppropriatenessAnalysis {
    pub formality: Formality,
    pub tone: Tone,
    pub audience_appropriateness: f64,
    pub style_consistency: f64,
    pub tone_alignment: f64,
    pub register_appropriateness: f64,
    pub context_mismatch: bool,
    pub factors: Vec<String>,
    pub confidence: f64,
}

pub fn detect_formality(words: &[String], text: &str, knowledge: &DiscourseKnowledge) -> Formality {
    let formal = words.iter().filter(|w| knowledge.formal_words.contains(w)).count();
    let mut informal = words.iter().filter(|w| knowledge.informal_words.contains(w)).count();
    if has_contraction(text) {
        informal += 1;
    }
    match formal.cmp(&informal) {
        std::cmp::Ordering::Greater => Formality::Formal,
        std::cmp::Ordering::Less => Formality::Informal,
        std::cmp::Ordering::Equal => Formality::Neutral,
    }
}

pub fn detect_tone(words: &[String], knowledge: &DiscourseKnowledge) -> Tone {
    let positive = words.iter().filter(|w| knowledge.positive_words.contains(w)).count();
    let negative = words.iter().filter(|w| knowledge.negative_words.contains(w)).count();
    match (positive, negative) {
        (0, 0) => Tone::Neutral,
        (p, n) if p > n => Tone::Positive,
        (p, n) if n > p => Tone::Negative,
        _ => Tone::Mixed,
    }
}

fn register_score(rule_type: &str, content_type: Option<&str>, formality: Formality) -> f64 {
    let formal_register = |f: Formality| match f {
        Formality::Formal => 0.9,
        Formality::Neutral => 0.7,
        Formality::Informal => 0.4,
    };
    match rule_type {
        "grammar" | "punctuation" => formal_register(formality),
        "style" | "tone" => match content_type {
            Some("technical" | "academic" | "business" | "legal" | "documentation") => formal_register(formality),
            Some("creative" | "narrative" | "blog" | "social") => 0.8,
            _ => 0.7,
        },
        _ => 0.7,
    }
}

/// `sentences` are the context sentences as text; `content_type` and
/// `rule_type` come from the validation context.
pub fn analyze(
    sentences: &[String],
    rule_type: &str,
    content_type: Option<&str>,
    knowledge: &DiscourseKnowledge,
) -> AppropriatenessAnalysis {
    let text = sentences.join(" ");
    let all_words = words(&text);
    let formality = detect_formality(&all_words, &text, knowledge);
    let tone = detect_tone(&all_words, knowledge);

    let expected = content_type.and_then(|ct| knowledge.expected_formality_for(ct));
    let audience_appropriateness = match expected {
        None => 0.7,
        Some(e) if e == formality.as_str() => 0.9,
        Some(_) if formality == Formality::Neutral => 0.7,
        Some("neutral") => 0.6,
        Some(_) => 0.3,
    };

    let lengths: Vec<f64> = sentences.iter().map(|s| words(s).len() as f64).collect();
    let avg_length = mean(&lengths);
    let style_consistency = if avg_length == 0.0 {
        0.5
    } else {
        clamp_unit(1.0 - 0.5 * variance(&lengths).sqrt() / avg_length)
    };

    let tone_alignment = match tone {
        Tone::Neutral => 0.8,
        Tone::Positive | Tone::Negative => 0.7,
        Tone::Mixed => 0.5,
    };

    let register_appropriateness = register_score(rule_type, content_type, formality);

    let has_slang = all_words.iter().any(|w| knowledge.slang.contains(w));
    let has_text_speak = all_words.iter().any(|w| knowledge.text_speak.contains(w));
    let context_mismatch =
        (has_slang && content_type == Some("technical")) || (has_text_speak && rule_type == "grammar");

    let mut factors = Vec::new();
    if audience_appropriateness < 0.5 {
        factors.push("formality_mismatch".to_string());
    }
    if avg_length > COMPLEX_SENTENCE_WORDS {
        factors.push("overly_complex_sentences".to_string());
    }
    if sentences.len() >= 2 && avg_length > 0.0 && avg_length < SIMPLE_SENTENCE_WORDS {
        factors.push("overly_simple_sentences".to_string());
    }
    let has_markers = knowledge
        .discourse_markers
        .values()
        .flatten()
        .any(|m| contains_phrase(&all_words, m));
    if sentences.len() >= 3 && !has_markers {
        factors.push("lacks_discourse_markers".to_string());
    }

    let mut confidence = mean(&[
        audience_appropriateness,
        style_consistency,
        tone_alignment,
        register_appropriateness,
    ]);
    if context_mismatch {
        confidence -= MISMATCH_PENALTY;
    }

    AppropriatenessAnalysis {
        formality,
        tone,
        audience_appropriateness,
        style_consistency,
        tone_alignment,
        register_appropriateness,
        context_mismatch,
        factors,
        confidence: clamp_unit(confidence),
    }
}

impl AppropriatenessAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} register with {} tone{}",
                self.formality.as_str(),
                self.tone.as_str(),
                if self.context_mismatch { "; context mismatch detected" } else { "" }
            ),
        )
        .with_data("formality_level", self.formality.as_str())
        .with_data("tone", self.tone.as_str())
        .with_data("audience_appropriateness", self.audience_appropriateness)
        .with_data("style_consistency", self.style_consistency)
        .with_data("tone_alignment", self.tone_alignment)
        .with_data("register_appropriateness", self.register_appropriateness)
        .with_data("context_mismatch", self.context_mismatch)
        .with_data("appropriateness_factors", self.factors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sentences: &[&str], rule_type: &str, content_type: Option<&str>) -> AppropriatenessAnalysis {
        let owned: Vec<String> = sentences.iter().map(|s| (*s).to_string()).collect();
        analyze(&owned, rule_type, content_type, &DiscourseKnowledge::default())
    }

    #[test]
    fn contractions_make_text_informal() {
        let kb = DiscourseKnowledge::default();
        let text = "We don't need it.";
        assert_eq!(detect_formality(&words(text), text, &kb), Formality::Informal);
        let formal = "Therefore the results demonstrate the effect.";
        assert_eq!(detect_formality(&words(formal), formal, &kb), Formality::Formal);
    }

    #[test]
    fn slang_in_technical_content_is_a_mismatch() {
        let a = run(&["The server is gonna restart."], "style", Some("technical"));
        assert!(a.context_mismatch);
        assert!(a.factors.contains(&"formality_mismatch".to_string()));
    }

    #[test]
    fn text_speak_with_grammar_rule_is_a_mismatch() {
        assert!(run(&["See u at the meeting."], "grammar", None).context_mismatch);
        assert!(!run(&["See you at the meeting."], "grammar", None).context_mismatch);
    }

    #[test]
    fn long_unmarked_passages_lack_markers() {
        let a = run(
            &["The cache stores pages.", "The server reads pages.", "The client shows pages."],
            "style",
            None,
        );
        assert!(a.factors.contains(&"lacks_discourse_markers".to_string()));
        assert!(a.factors.contains(&"overly_simple_sentences".to_string()));
    }

    #[test]
    fn tone_detection() {
        let kb = DiscourseKnowledge::default();
        assert_eq!(detect_tone(&words("a great and reliable tool"), &kb), Tone::Positive);
        assert_eq!(detect_tone(&words("good but broken"), &kb), Tone::Mixed);
        assert_eq!(detect_tone(&words("plain words"), &kb), Tone::Neutral);
    }
}
