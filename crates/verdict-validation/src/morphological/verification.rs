//! Self-consistency check of the tagging against neighbouring tokens.

use verdict_core::models::{Token, ValidationEvidence};

use super::TokenWindow;
use crate::knowledge::MorphologyKnowledge;
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "cross_model_verification";

/// Scores at or below this are noise and produce no evidence.
pub const MIN_VERIFICATION_SCORE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationAnalysis {
    pub pos_consistency: f64,
    pub morphological_consistency: f64,
    pub combined: f64,
}

fn neighbour_score(token: &Token, previous: Option<&Token>, next: Option<&Token>) -> f64 {
    let prev_is = |tags: &[&str]| previous.is_some_and(|t| tags.contains(&t.pos.as_str()));
    let next_is = |tags: &[&str]| next.is_some_and(|t| tags.contains(&t.pos.as_str()));

    let mut score: f64 = 0.5;
    match token.pos.as_str() {
        "NOUN" | "PROPN" => {
            if prev_is(&["DET", "ADJ", "NUM"]) {
                score += 0.3;
            }
            if next_is(&["VERB", "AUX"]) {
                score += 0.2;
            }
        }
        "VERB" => {
            if prev_is(&["PRON", "NOUN", "PROPN", "AUX", "PART"]) {
                score += 0.3;
            }
            if next_is(&["DET", "NOUN", "ADV", "ADP", "PRON", "ADJ"]) {
                score += 0.2;
            }
        }
        "ADJ" => {
            if next_is(&["NOUN", "PROPN"]) {
                score += 0.3;
            }
            if prev_is(&["AUX", "ADV", "DET"]) {
                score += 0.2;
            }
        }
        "ADV" => {
            if prev_is(&["VERB", "AUX"]) || next_is(&["VERB", "ADJ", "ADV"]) {
                score += 0.3;
            }
        }
        _ => {}
    }
    score.min(1.0)
}

/// `None` when the combined score is too weak to report.
pub fn analyze(
    token: &Token,
    window: &TokenWindow<'_>,
    rule_type: &str,
    knowledge: &MorphologyKnowledge,
) -> Option<VerificationAnalysis> {
    let pos_consistency = neighbour_score(token, window.left.last().copied(), window.right.first().copied());
    let morphological_consistency = knowledge.rule_consistency(rule_type);
    let combined = clamp_unit((pos_consistency + morphological_consistency) / 2.0);
    (combined > MIN_VERIFICATION_SCORE).then_some(VerificationAnalysis {
        pos_consistency,
        morphological_consistency,
        combined,
    })
}

impl VerificationAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.combined,
            format!(
                "tagging is locally consistent (pos {:.2}, morphology {:.2})",
                self.pos_consistency, self.morphological_consistency
            ),
        )
        .with_weight(0.7)
        .with_data("pos_consistency", self.pos_consistency)
        .with_data("morphological_consistency", self.morphological_consistency)
    }
}
