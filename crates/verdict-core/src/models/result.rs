use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::confidence_breakdown::clamp_unit;
use super::{ValidationConfidence, ValidationContext, ValidationDecision, ValidationEvidence};

/// Output of one `validate_error` call.
///
/// Built once per call and never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub validator_name: String,
    pub decision: ValidationDecision,
    pub confidence: ValidationConfidence,
    /// Score in `[0, 1]`.
    pub confidence_score: f64,
    pub evidence: Vec<ValidationEvidence>,
    pub reasoning: String,
    pub error_text: String,
    pub error_position: usize,
    pub rule_type: Option<String>,
    pub rule_name: Option<String>,
    /// Wall time in seconds.
    pub validation_time: f64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub validated_at: DateTime<Utc>,
}

impl ValidationResult {
    pub fn new(
        validator_name: impl Into<String>,
        decision: ValidationDecision,
        confidence_score: f64,
        evidence: Vec<ValidationEvidence>,
        reasoning: impl Into<String>,
        ctx: &ValidationContext,
    ) -> Self {
        let score = clamp_unit(confidence_score);
        Self {
            validator_name: validator_name.into(),
            decision,
            confidence: ValidationConfidence::from_score(score),
            confidence_score: score,
            evidence,
            reasoning: reasoning.into(),
            error_text: ctx.error_text.clone(),
            error_position: ctx.error_position,
            rule_type: ctx.rule_type.clone(),
            rule_name: ctx.rule_name.clone(),
            validation_time: 0.0,
            metadata: Map::new(),
            validated_at: Utc::now(),
        }
    }

    /// UNCERTAIN with no evidence; the "I don't know" answer.
    pub fn uncertain(
        validator_name: impl Into<String>,
        confidence_score: f64,
        reasoning: impl Into<String>,
        ctx: &ValidationContext,
    ) -> Self {
        Self::new(
            validator_name,
            ValidationDecision::Uncertain,
            confidence_score,
            Vec::new(),
            reasoning,
            ctx,
        )
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_validation_time(mut self, seconds: f64) -> Self {
        self.validation_time = seconds.max(0.0);
        self
    }

    /// True only for a non-UNCERTAIN decision scored at or above `min_confidence`.
    pub fn is_decisive(&self, min_confidence: f64) -> bool {
        self.decision != ValidationDecision::Uncertain && self.confidence_score >= min_confidence
    }

    pub fn has_evidence_type(&self, evidence_type: &str) -> bool {
        self.evidence.iter().any(|e| e.evidence_type == evidence_type)
    }

    pub fn evidence_of_type<'a>(
        &'a self,
        evidence_type: &'a str,
    ) -> impl Iterator<Item = &'a ValidationEvidence> + 'a {
        self.evidence
            .iter()
            .filter(move |e| e.evidence_type == evidence_type)
    }

    /// Whether this result came out of a contained failure.
    pub fn is_error_result(&self) -> bool {
        self.evidence.iter().any(ValidationEvidence::is_error)
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({} confidence, {:.3}) for '{}' [{}] - {}",
            self.validator_name,
            self.decision,
            self.confidence,
            self.confidence_score,
            self.error_text,
            self.rule_name.as_deref().unwrap_or("unknown_rule"),
            self.reasoning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::new("Some text here.", 5, "text").with_rule("grammar", "agreement")
    }

    #[test]
    fn decisive_requires_decision_and_score() {
        let accept = ValidationResult::new("v", ValidationDecision::Accept, 0.75, vec![], "r", &ctx());
        assert!(accept.is_decisive(0.7));
        assert!(!accept.is_decisive(0.8));

        let uncertain = ValidationResult::uncertain("v", 0.95, "r", &ctx());
        assert!(!uncertain.is_decisive(0.1));
    }

    #[test]
    fn confidence_band_tracks_score() {
        let r = ValidationResult::new("v", ValidationDecision::Reject, 1.4, vec![], "r", &ctx());
        assert_eq!(r.confidence_score, 1.0);
        assert_eq!(r.confidence, ValidationConfidence::High);
        assert_eq!(r.rule_name.as_deref(), Some("agreement"));
    }
}
