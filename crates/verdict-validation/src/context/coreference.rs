//! Pronoun antecedent search, or reference clarity for non-pronouns.

use verdict_core::models::{Document, Sentence, Token, ValidationEvidence};

use crate::knowledge::DiscourseKnowledge;
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "coreference";

/// Candidates above this score compete for the pronoun.
const AMBIGUITY_FLOOR: f64 = 0.5;
const UNRESOLVED_CONFIDENCE: f64 = 0.3;
const AMBIGUITY_PENALTY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Antecedent {
    pub text: String,
    pub index: usize,
    pub distance: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoreferenceAnalysis {
    Pronoun {
        pronoun: String,
        category: String,
        antecedent: Option<Antecedent>,
        candidates: usize,
        ambiguous: bool,
        confidence: f64,
    },
    Reference {
        word: String,
        repetitions: usize,
        proper_noun: bool,
        clarity: f64,
    },
}

/// `max(0.1, 1 - 0.1 * distance)`.
pub fn antecedent_score(distance: usize) -> f64 {
    (1.0 - 0.1 * distance as f64).max(0.1)
}

/// `window` is the context sentences in document order.
pub fn analyze(
    doc: &Document,
    token: &Token,
    window: &[&Sentence],
    knowledge: &DiscourseKnowledge,
) -> CoreferenceAnalysis {
    let lower = token.lower();
    match knowledge.pronoun_category(&lower) {
        Some(category) => resolve_pronoun(doc, token, window, lower.clone(), category),
        None => reference_clarity(doc, token, window, lower),
    }
}

fn window_tokens<'a>(doc: &'a Document, window: &'a [&'a Sentence]) -> impl Iterator<Item = &'a Token> + 'a {
    window.iter().flat_map(move |s| doc.sentence_tokens(s).iter())
}

fn resolve_pronoun(
    doc: &Document,
    token: &Token,
    window: &[&Sentence],
    pronoun: String,
    category: &str,
) -> CoreferenceAnalysis {
    let mut candidates: Vec<Antecedent> = window_tokens(doc, window)
        .filter(|t| t.index < token.index && matches!(t.pos.as_str(), "NOUN" | "PROPN"))
        .map(|t| {
            let distance = token.index - t.index;
            Antecedent {
                text: t.text.clone(),
                index: t.index,
                distance,
                score: antecedent_score(distance),
            }
        })
        .collect();
    // Nearest first; stable so equal scores keep document order.
    candidates.sort_by_key(|c| c.distance);

    let strong = candidates.iter().filter(|c| c.score > AMBIGUITY_FLOOR).count();
    let ambiguous = strong > 1;
    let antecedent = candidates.first().cloned();
    let confidence = match &antecedent {
        Some(best) if ambiguous => best.score * AMBIGUITY_PENALTY,
        Some(best) => best.score,
        None => UNRESOLVED_CONFIDENCE,
    };

    CoreferenceAnalysis::Pronoun {
        pronoun,
        category: category.to_string(),
        antecedent,
        candidates: candidates.len(),
        ambiguous,
        confidence: clamp_unit(confidence),
    }
}

fn reference_clarity(doc: &Document, token: &Token, window: &[&Sentence], word: String) -> CoreferenceAnalysis {
    let lemma = token.lemma.to_lowercase();
    let repetitions = window_tokens(doc, window)
        .filter(|t| t.index != token.index && t.lemma.to_lowercase() == lemma)
        .count();
    let proper_noun = token.pos == "PROPN";

    let mut clarity = 0.3;
    clarity += 0.3 * (token.char_len() as f64 / 8.0).min(1.0);
    if proper_noun {
        clarity += 0.2;
    }
    clarity += (0.1 * repetitions as f64).min(0.2);

    CoreferenceAnalysis::Reference {
        word,
        repetitions,
        proper_noun,
        clarity: clamp_unit(clarity),
    }
}

impl CoreferenceAnalysis {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Pronoun { confidence, .. } => *confidence,
            Self::Reference { clarity, .. } => *clarity,
        }
    }

    pub fn to_evidence(&self) -> ValidationEvidence {
        match self {
            Self::Pronoun {
                pronoun,
                category,
                antecedent,
                candidates,
                ambiguous,
                confidence,
            } => {
                let description = match antecedent {
                    Some(a) if *ambiguous => format!(
                        "{category} pronoun '{pronoun}' most likely refers to '{}' but {candidates} candidates compete",
                        a.text
                    ),
                    Some(a) => format!("{category} pronoun '{pronoun}' refers to '{}'", a.text),
                    None => format!("{category} pronoun '{pronoun}' has no antecedent in context"),
                };
                let mut evidence = ValidationEvidence::new(EVIDENCE_TYPE, *confidence, description)
                    .with_data("pronoun", pronoun.as_str())
                    .with_data("pronoun_category", category.as_str())
                    .with_data("candidate_count", *candidates as u64)
                    .with_data("ambiguous", *ambiguous);
                if let Some(a) = antecedent {
                    evidence = evidence
                        .with_data("antecedent", a.text.as_str())
                        .with_data("antecedent_distance", a.distance as u64);
                }
                evidence
            }
            Self::Reference {
                word,
                repetitions,
                proper_noun,
                clarity,
            } => ValidationEvidence::new(
                EVIDENCE_TYPE,
                *clarity,
                format!("reference clarity of '{word}' is {clarity:.2}"),
            )
            .with_weight(0.6)
            .with_data("word", word.as_str())
            .with_data("repetitions", *repetitions as u64)
            .with_data("proper_noun", *proper_noun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_decays_with_distance_and_floors() {
        assert!((antecedent_score(4) - 0.6).abs() < 1e-9);
        assert_eq!(antecedent_score(0), 1.0);
        assert_eq!(antecedent_score(30), 0.1);
    }
}
