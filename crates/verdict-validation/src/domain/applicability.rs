//! How much a rule matters in the identified domain.

use verdict_core::models::{DomainAnalysis, ValidationEvidence};

use crate::knowledge::{DomainKnowledge, DomainProfile};
use crate::text::clamp_unit;

pub const EVIDENCE_TYPE: &str = "rule_applicability";

const CONTENT_TYPE_MATCH: f64 = 0.8;
const CONTENT_TYPE_MISMATCH: f64 = 0.2;
const EXCEPTION_DISCOUNT: f64 = 0.8;
/// Evidence weight when the domain identification itself is shaky.
const UNCERTAIN_DOMAIN_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    High,
    Medium,
    None,
}

impl NameMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::None => "none",
        }
    }

    fn bonus(self) -> f64 {
        match self {
            Self::High => 0.1,
            Self::Medium => 0.05,
            Self::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicabilityAnalysis {
    pub domain: String,
    pub domain_relevance: f64,
    pub name_match: NameMatch,
    pub content_type_match: bool,
    pub audience_alignment: f64,
    pub applicability: f64,
    pub exceptions: Vec<String>,
    pub confidence_modifier: f64,
    pub domain_confident: bool,
    pub confidence: f64,
}

fn name_match(rule_name: &str, profile: Option<&DomainProfile>) -> NameMatch {
    let Some(profile) = profile else {
        return NameMatch::None;
    };
    let name = rule_name.to_lowercase();
    if profile.high_applicability.iter().any(|f| name.contains(f.as_str())) {
        NameMatch::High
    } else if profile.medium_applicability.iter().any(|f| name.contains(f.as_str())) {
        NameMatch::Medium
    } else {
        NameMatch::None
    }
}

pub fn analyze(
    rule_type: &str,
    rule_name: &str,
    analysis: &DomainAnalysis,
    min_domain_confidence: f64,
    knowledge: &DomainKnowledge,
) -> ApplicabilityAnalysis {
    let domain = analysis.primary_domain.as_str();
    let profile = knowledge.profile(domain);

    let domain_relevance = knowledge.relevance(rule_type, domain);
    let name_match = name_match(rule_name, profile);
    let content_type_match = knowledge.content_type_matches(&analysis.content_type, domain);
    let technical_audience = profile.is_some_and(|p| p.audience_is_technical);
    let audience_alignment = knowledge.audience_alignment(rule_type, technical_audience);

    let applicability = clamp_unit(
        0.4 * domain_relevance
            + 0.3 * if content_type_match { CONTENT_TYPE_MATCH } else { CONTENT_TYPE_MISMATCH }
            + 0.3 * audience_alignment
            + name_match.bonus(),
    );

    let exceptions = profile
        .map(|p| p.exceptions_for(rule_type).to_vec())
        .unwrap_or_default();
    let confidence_modifier = if exceptions.is_empty() { 1.0 } else { EXCEPTION_DISCOUNT };

    ApplicabilityAnalysis {
        domain: domain.to_string(),
        domain_relevance,
        name_match,
        content_type_match,
        audience_alignment,
        applicability,
        exceptions,
        confidence_modifier,
        domain_confident: analysis.confidence >= min_domain_confidence,
        confidence: clamp_unit(applicability * confidence_modifier),
    }
}

impl ApplicabilityAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        let weight = if self.domain_confident { 1.0 } else { UNCERTAIN_DOMAIN_WEIGHT };
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "rule relevance {:.2} in the {} domain, applicability {:.2}{}",
                self.domain_relevance,
                self.domain,
                self.applicability,
                if self.exceptions.is_empty() {
                    String::new()
                } else {
                    format!(" (exceptions: {})", self.exceptions.join(", "))
                }
            ),
        )
        .with_weight(weight)
        .with_data("domain", self.domain.as_str())
        .with_data("domain_relevance", self.domain_relevance)
        .with_data("rule_name_match", self.name_match.as_str())
        .with_data("content_type_match", self.content_type_match)
        .with_data("audience_alignment", self.audience_alignment)
        .with_data("applicability_score", self.applicability)
        .with_data("domain_exceptions", self.exceptions.clone())
        .with_data("confidence_modifier", self.confidence_modifier)
        .with_data("domain_confident", self.domain_confident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creative() -> DomainAnalysis {
        let mut analysis = DomainAnalysis::new("creative", "creative");
        analysis.confidence = 0.9;
        analysis
    }

    #[test]
    fn technical_terminology_is_weak_in_creative_writing() {
        let kb = DomainKnowledge::default();
        let a = analyze("terminology", "technical_precision", &creative(), 0.6, &kb);
        assert_eq!(a.domain_relevance, 0.2);
        assert!(a.content_type_match);
        assert_eq!(a.exceptions, vec!["invented_terms_acceptable".to_string()]);
        assert_eq!(a.confidence_modifier, EXCEPTION_DISCOUNT);
        assert!(a.confidence < 0.5);
    }

    #[test]
    fn rule_name_fragments_raise_applicability() {
        let kb = DomainKnowledge::default();
        let technical = DomainAnalysis::new("technical", "technical");
        let plain = analyze("terminology", "word_choice", &technical, 0.6, &kb);
        let named = analyze("terminology", "technical_precision", &technical, 0.6, &kb);
        assert_eq!(named.name_match, NameMatch::High);
        assert!(named.applicability > plain.applicability);
        assert!(!named.domain_confident);
    }
}
