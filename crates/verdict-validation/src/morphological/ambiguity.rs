//! Semantic (homonym) and POS ambiguity detection with context-clue resolution.

use std::collections::BTreeSet;

use serde_json::json;

use verdict_core::models::{Document, Token, ValidationEvidence};

use crate::knowledge::{Interpretation, MorphologyKnowledge};
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "morphological_ambiguity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityKind {
    Semantic,
    PartOfSpeech,
}

impl AmbiguityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::PartOfSpeech => "part_of_speech",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguityAnalysis {
    pub word: String,
    pub kind: AmbiguityKind,
    pub interpretations: Vec<String>,
    /// Indicator words found in the sentence.
    pub clues: Vec<String>,
    pub dominant: String,
    pub dominant_prior: f64,
    /// For POS ambiguity, whether the tagger agrees with the dominant reading.
    pub tagger_agrees: Option<bool>,
    pub confidence: f64,
}

/// `None` when the word is not ambiguous.
pub fn analyze(doc: &Document, token: &Token, knowledge: &MorphologyKnowledge) -> Option<AmbiguityAnalysis> {
    let lower = token.lower();
    let (kind, readings) = if let Some(readings) = knowledge.homonyms.get(&lower) {
        (AmbiguityKind::Semantic, readings)
    } else if let Some(readings) = knowledge.pos_ambiguous.get(&lower) {
        (AmbiguityKind::PartOfSpeech, readings)
    } else {
        return None;
    };

    let context: BTreeSet<String> = doc
        .sentence_of(token)
        .map(|s| doc.sentence_tokens(s))
        .unwrap_or(&[])
        .iter()
        .filter(|t| t.index != token.index)
        .flat_map(|t| [t.lower(), t.lemma.to_lowercase()])
        .collect();

    let mut clues = Vec::new();
    let mut best: Option<(&Interpretation, usize)> = None;
    for reading in readings {
        let found: Vec<&String> = reading
            .indicators
            .iter()
            .filter(|i| context.contains(i.as_str()))
            .collect();
        clues.extend(found.iter().map(|s| (*s).clone()));
        let better = match best {
            None => true,
            Some((current, count)) => {
                found.len() > count || (found.len() == count && reading.prior > current.prior)
            }
        };
        if better {
            best = Some((reading, found.len()));
        }
    }
    let (dominant, _) = best?;

    let mut confidence = 0.3 + (0.1 * clues.len() as f64).min(0.4);
    if dominant.prior > 0.5 {
        confidence += (0.3 * dominant.prior).min(0.3);
    }

    let tagger_agrees = match kind {
        AmbiguityKind::PartOfSpeech => Some(dominant.sense == token.pos),
        AmbiguityKind::Semantic => None,
    };

    Some(AmbiguityAnalysis {
        word: lower,
        kind,
        interpretations: readings.iter().map(|r| r.sense.clone()).collect(),
        clues,
        dominant: dominant.sense.clone(),
        dominant_prior: dominant.prior,
        tagger_agrees,
        confidence: clamp_unit(confidence),
    })
}

impl AmbiguityAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "'{}' has {} ambiguity; context favours '{}' ({} clue(s))",
                self.word,
                self.kind.as_str(),
                self.dominant,
                self.clues.len()
            ),
        )
        .with_weight(0.8)
        .with_data("word", self.word.as_str())
        .with_data("ambiguity_type", self.kind.as_str())
        .with_data("interpretations", self.interpretations.clone())
        .with_data("context_clues", self.clues.clone())
        .with_data("dominant_interpretation", self.dominant.as_str())
        .with_data("dominant_prior", self.dominant_prior)
        .with_data("tagger_agrees", json!(self.tagger_agrees))
    }
}
