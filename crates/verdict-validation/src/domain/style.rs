//! Detected style features against the domain's style expectations.

use verdict_core::models::ValidationEvidence;

use crate::context::appropriateness::{detect_formality, detect_tone, Formality, Tone};
use crate::knowledge::{DiscourseKnowledge, StyleExpectation};
use crate::text::{clamp_unit, mean, paragraphs, sentences, words};

pub const EVIDENCE_TYPE: &str = "domain_style_consistency";

#[derive(Debug, Clone, PartialEq)]
pub struct StyleAnalysis {
    pub avg_sentence_length: f64,
    pub avg_paragraph_length: f64,
    pub formality: Formality,
    pub tone: Tone,
    pub length_fit: f64,
    pub formality_match: f64,
    pub consistency: f64,
    pub violations: Vec<String>,
    pub recommendations: Vec<String>,
}

/// 1 inside the preferred range, falling linearly with the relative distance outside it.
pub fn length_fit(avg: f64, min: f64, max: f64) -> f64 {
    if avg < min {
        clamp_unit(1.0 - (min - avg) / min.max(1.0))
    } else if avg > max {
        clamp_unit(1.0 - (avg - max) / max.max(1.0))
    } else {
        1.0
    }
}

fn formality_match(expected: &str, detected: Formality) -> f64 {
    if expected == detected.as_str() {
        1.0
    } else if detected == Formality::Neutral || expected == "neutral" {
        0.7
    } else {
        0.3
    }
}

pub fn analyze(text: &str, expectation: &StyleExpectation, discourse: &DiscourseKnowledge) -> StyleAnalysis {
    let sentence_list = sentences(text);
    let lengths: Vec<f64> = sentence_list.iter().map(|s| words(s).len() as f64).collect();
    let avg_sentence_length = mean(&lengths);
    let paragraph_lengths: Vec<f64> = paragraphs(text)
        .iter()
        .map(|p| sentences(p).len() as f64)
        .collect();
    let avg_paragraph_length = mean(&paragraph_lengths);

    let all_words = words(text);
    let formality = detect_formality(&all_words, text, discourse);
    let tone = detect_tone(&all_words, discourse);

    let fit = if lengths.is_empty() {
        0.5
    } else {
        length_fit(avg_sentence_length, expectation.min_sentence_length, expectation.max_sentence_length)
    };
    let formality_score = formality_match(&expectation.formality, formality);
    let consistency = clamp_unit((fit + formality_score) / 2.0);

    let mut violations = Vec::new();
    let mut recommendations = Vec::new();
    if !lengths.is_empty() && avg_sentence_length > expectation.max_sentence_length {
        violations.push(format!(
            "sentences_too_long (avg: {avg_sentence_length:.1}, max: {})",
            expectation.max_sentence_length
        ));
        recommendations.push(format!(
            "Break long sentences to stay under {} words",
            expectation.max_sentence_length
        ));
    }
    if !lengths.is_empty() && avg_sentence_length < expectation.min_sentence_length {
        violations.push(format!(
            "sentences_too_short (avg: {avg_sentence_length:.1}, min: {})",
            expectation.min_sentence_length
        ));
        recommendations.push("Combine short sentences for smoother reading".to_string());
    }
    match (expectation.formality.as_str(), formality) {
        ("formal", Formality::Informal) => {
            violations.push("informal_language_in_formal_context".to_string());
            recommendations.push("Replace casual expressions and contractions with formal wording".to_string());
        }
        ("informal", Formality::Formal) => {
            violations.push("overly_formal_language".to_string());
            recommendations.push("Use a more relaxed, conversational register".to_string());
        }
        _ => {}
    }
    if expectation.tone != "neutral" && !matches!(tone, Tone::Neutral | Tone::Mixed) && expectation.tone != tone.as_str() {
        violations.push(format!("tone_mismatch (expected: {}, found: {})", expectation.tone, tone.as_str()));
        recommendations.push(format!("Adjust the tone towards {}", expectation.tone));
    }

    StyleAnalysis {
        avg_sentence_length,
        avg_paragraph_length,
        formality,
        tone,
        length_fit: fit,
        formality_match: formality_score,
        consistency,
        violations,
        recommendations,
    }
}

impl StyleAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.consistency,
            format!(
                "style consistency {:.2} with {} violation(s)",
                self.consistency,
                self.violations.len()
            ),
        )
        .with_data("avg_sentence_length", self.avg_sentence_length)
        .with_data("avg_paragraph_length", self.avg_paragraph_length)
        .with_data("formality_level", self.formality.as_str())
        .with_data("tone", self.tone.as_str())
        .with_data("length_fit", self.length_fit)
        .with_data("formality_match", self.formality_match)
        .with_data("violations", self.violations.clone())
        .with_data("recommendations", self.recommendations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::DomainKnowledge;

    fn expectation(domain: &str) -> StyleExpectation {
        DomainKnowledge::default().domains[domain].style.clone()
    }

    #[test]
    fn length_fit_is_one_inside_range() {
        assert_eq!(length_fit(15.0, 10.0, 25.0), 1.0);
        assert!((length_fit(50.0, 10.0, 25.0) - 0.0).abs() < 1e-9);
        assert!((length_fit(5.0, 10.0, 25.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn informal_technical_prose_is_flagged() {
        let text = "We're gonna fix it. It's kinda broken.";
        let a = analyze(text, &expectation("technical"), &DiscourseKnowledge::default());
        assert_eq!(a.formality, Formality::Informal);
        assert!(a.violations.contains(&"informal_language_in_formal_context".to_string()));
        assert!(a.violations.iter().any(|v| v.starts_with("sentences_too_short")));
        assert_eq!(a.recommendations.len(), a.violations.len());
    }

    #[test]
    fn long_sentences_report_average_and_limit() {
        let long = vec!["word"; 40].join(" ") + ".";
        let a = analyze(&long, &expectation("business"), &DiscourseKnowledge::default());
        assert_eq!(a.violations[0], "sentences_too_long (avg: 40.0, max: 22)");
    }
}
