//! POS tagging evidence.

use serde_json::{json, Map, Value};

use verdict_core::models::{Token, ValidationEvidence};

use super::TokenWindow;
use crate::knowledge::MorphologyKnowledge;
use crate::text::{clamp_unit, ratio};

pub const EVIDENCE_TYPE: &str = "pos_tagging";

const BASE_CONFIDENCE: f64 = 0.5;
const MAJOR_CLASSES: [&str; 3] = ["NOUN", "VERB", "ADJ"];

#[derive(Debug, Clone, PartialEq)]
pub struct PosAnalysis {
    pub token: String,
    pub pos: String,
    pub tag: String,
    pub lemma: String,
    pub features: Map<String, Value>,
    /// Fraction of window tokens whose POS is expected next to this one.
    pub context_match: f64,
    pub confidence: f64,
}

pub fn analyze(
    token: &Token,
    window: &TokenWindow<'_>,
    rule_type: &str,
    knowledge: &MorphologyKnowledge,
) -> PosAnalysis {
    let mut confidence = BASE_CONFIDENCE;
    confidence += match rule_type {
        "grammar" => 0.2,
        "style" => 0.1,
        _ => 0.0,
    };
    if MAJOR_CLASSES.contains(&token.pos.as_str()) {
        confidence += 0.15;
    }

    let expected = knowledge.expected_pos_context.get(&token.pos);
    let neighbours: Vec<&Token> = window.iter().collect();
    let matching = expected.map_or(0, |expected| {
        neighbours
            .iter()
            .filter(|t| expected.iter().any(|p| *p == t.pos))
            .count()
    });
    let context_match = ratio(matching, neighbours.len());
    confidence += 0.15 * context_match;

    let features = token
        .morph_features()
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    PosAnalysis {
        token: token.text.clone(),
        pos: token.pos.clone(),
        tag: token.tag.clone(),
        lemma: token.lemma.clone(),
        features,
        context_match,
        confidence: clamp_unit(confidence),
    }
}

impl PosAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!("'{}' tagged {} ({}), lemma '{}'", self.token, self.pos, self.tag, self.lemma),
        )
        .with_data("token", self.token.as_str())
        .with_data("pos", self.pos.as_str())
        .with_data("tag", self.tag.as_str())
        .with_data("lemma", self.lemma.as_str())
        .with_data("morphology", Value::Object(self.features.clone()))
        .with_data("context_match", json!(self.context_match))
    }
}
