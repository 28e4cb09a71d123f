//! Dependency-parse evidence: relation, head, role and position.

use verdict_core::models::{Document, Token, ValidationEvidence};

use crate::knowledge::MorphologyKnowledge;
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "dependency_parsing";

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyAnalysis {
    pub token: String,
    pub relation: String,
    pub head: String,
    pub head_pos: String,
    pub children: Vec<String>,
    pub role: String,
    /// 0 at the first token of the sentence, 1 at the last.
    pub sentence_position: f64,
    pub head_distance: usize,
    pub confidence: f64,
}

pub fn analyze(
    doc: &Document,
    token: &Token,
    rule_type: &str,
    knowledge: &MorphologyKnowledge,
) -> DependencyAnalysis {
    let head = doc.head_of(token).unwrap_or(token);
    let role = knowledge.role_for(&token.dep);
    let head_distance = token.index.abs_diff(head.index);

    let sentence_position = doc
        .sentence_of(token)
        .map(|s| {
            let span = s.token_count().saturating_sub(1);
            if span == 0 {
                0.5
            } else {
                (token.index - s.start_token) as f64 / span as f64
            }
        })
        .unwrap_or(0.5);

    let mut confidence = 0.5;
    if rule_type == "grammar" {
        confidence += 0.2;
    }
    if knowledge.is_clear_role(&role) {
        confidence += 0.15;
    }
    confidence += 0.15 / head_distance.max(1) as f64;
    confidence += 0.1 * (1.0 - (sentence_position - 0.5).abs() * 2.0);

    DependencyAnalysis {
        token: token.text.clone(),
        relation: token.dep.clone(),
        head: head.text.clone(),
        head_pos: head.pos.clone(),
        children: doc.children_of(token).map(|c| c.text.clone()).collect(),
        role,
        sentence_position,
        head_distance,
        confidence: clamp_unit(confidence),
    }
}

impl DependencyAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "'{}' is {} ({}) of '{}'",
                self.token, self.role, self.relation, self.head
            ),
        )
        .with_data("relation", self.relation.as_str())
        .with_data("head", self.head.as_str())
        .with_data("head_pos", self.head_pos.as_str())
        .with_data("children", self.children.clone())
        .with_data("syntactic_role", self.role.as_str())
        .with_data("sentence_position", self.sentence_position)
        .with_data("head_distance", self.head_distance as u64)
    }
}
