//! DomainValidator: rule applicability, terminology, style and audience fit
//! for the domain the text belongs to.

pub mod applicability;
pub mod audience;
pub mod classification;
pub mod style;
pub mod terminology;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use verdict_core::config::DomainConfig;
use verdict_core::constants::{DOMAIN_CACHE_KEY_CHARS, NO_EVIDENCE_CONFIDENCE, VERSION};
use verdict_core::errors::VerdictResult;
use verdict_core::models::evidence::weighted_average_confidence;
use verdict_core::models::{
    AnalysisSource, DomainAnalysis, ValidationContext, ValidationDecision, ValidationEvidence, ValidationResult,
};
use verdict_core::traits::DomainClassifier;
use verdict_core::AnalysisCache;

use crate::base::{try_analysis, PassValidator, ValidatorCore};
use crate::introspection::{AnalysisStatistics, ValidatorInfo};
use crate::knowledge::{CompiledDomainPatterns, KnowledgeBase};

pub const VALIDATOR_NAME: &str = "domain_validator";

/// Leading characters of the text plus the content-type hint.
pub type DomainCacheKey = (String, String);

pub fn domain_cache_key(text: &str, content_type: Option<&str>) -> DomainCacheKey {
    (
        text.chars().take(DOMAIN_CACHE_KEY_CHARS).collect(),
        content_type.unwrap_or_default().to_string(),
    )
}

pub struct DomainValidator {
    core: ValidatorCore,
    config: DomainConfig,
    knowledge: Arc<KnowledgeBase>,
    patterns: CompiledDomainPatterns,
    classifier: Option<Arc<dyn DomainClassifier>>,
    cache: AnalysisCache<DomainCacheKey, DomainAnalysis>,
    classifier_fallbacks: AtomicU64,
}

impl DomainValidator {
    pub fn new() -> VerdictResult<Self> {
        Self::with_config(DomainConfig::default())
    }

    pub fn with_config(config: DomainConfig) -> VerdictResult<Self> {
        let knowledge = Arc::new(KnowledgeBase::default());
        let patterns = CompiledDomainPatterns::compile(&knowledge.domains)?;
        Ok(Self {
            core: ValidatorCore::new(VALIDATOR_NAME, config.base.clone()),
            config,
            knowledge,
            patterns,
            classifier: None,
            cache: AnalysisCache::new(),
            classifier_fallbacks: AtomicU64::new(0),
        })
    }

    /// Prefer `classifier` over the local heuristic while domain classification is enabled.
    pub fn with_classifier(mut self, classifier: Arc<dyn DomainClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Swap the knowledge base. Domain patterns are recompiled and cached analyses dropped.
    pub fn with_knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> VerdictResult<Self> {
        self.patterns = CompiledDomainPatterns::compile(&knowledge.domains)?;
        self.knowledge = knowledge;
        self.cache.clear();
        Ok(self)
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }

    pub fn classifier_fallback_count(&self) -> u64 {
        self.classifier_fallbacks.load(Ordering::Relaxed)
    }

    /// Cached domain analysis for `text`, with the caller's hints applied.
    pub fn analyze_domain(&self, ctx: &ValidationContext) -> DomainAnalysis {
        let content_type = ctx.content_type.as_deref();
        let mut analysis = self
            .cache
            .get_or_compute(domain_cache_key(&ctx.text, content_type), || {
                self.classify(&ctx.text, content_type)
            });
        if let Some(domain) = ctx.domain.as_deref() {
            if self.knowledge.domains.profile(domain).is_some() {
                analysis.primary_domain = domain.to_string();
            }
        }
        analysis
    }

    fn classify(&self, text: &str, content_type: Option<&str>) -> DomainAnalysis {
        let fallback = || {
            classification::classify(text, content_type, &self.patterns, &self.knowledge.domains)
        };
        let Some(classifier) = self.classifier.as_ref().filter(|_| self.config.enable_domain_classification)
        else {
            return fallback();
        };

        match classifier.classify(text) {
            Ok(mut analysis) if analysis.confidence >= self.config.min_domain_confidence => {
                analysis.source = AnalysisSource::Classifier;
                if let Some(ct) = content_type {
                    analysis.content_type = ct.to_string();
                }
                analysis
            }
            Ok(analysis) => {
                self.classifier_fallbacks.fetch_add(1, Ordering::Relaxed);
                debug!(
                    validator = VALIDATOR_NAME,
                    domain = %analysis.primary_domain,
                    confidence = analysis.confidence,
                    "classifier below confidence floor; using keyword heuristic"
                );
                fallback()
            }
            Err(err) => {
                self.classifier_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(validator = VALIDATOR_NAME, error = %err, "domain classifier failed; using keyword heuristic");
                fallback()
            }
        }
    }

    fn collect_evidence(&self, ctx: &ValidationContext, analysis: &DomainAnalysis) -> Vec<ValidationEvidence> {
        let domains = &self.knowledge.domains;
        let domain = analysis.primary_domain.as_str();
        let profile = domains.profile(domain);
        let rule_type = ctx.rule_type_str();
        let mut evidence = Vec::new();

        evidence.extend(try_analysis(VALIDATOR_NAME, applicability::EVIDENCE_TYPE, || {
            Ok(Some(
                applicability::analyze(
                    rule_type,
                    ctx.rule_name_str(),
                    analysis,
                    self.config.min_domain_confidence,
                    domains,
                )
                .to_evidence(),
            ))
        }));
        if self.config.enable_terminology_validation {
            evidence.extend(try_analysis(VALIDATOR_NAME, terminology::EVIDENCE_TYPE, || {
                let term = terminology::flagged_term(&ctx.text, ctx.error_position, &ctx.error_text);
                if term.is_empty() {
                    return Ok(None);
                }
                Ok(Some(
                    terminology::analyze(&ctx.text, &term, domain, profile, &self.patterns).to_evidence(),
                ))
            }));
        }
        if self.config.enable_style_consistency {
            evidence.extend(try_analysis(VALIDATOR_NAME, style::EVIDENCE_TYPE, || {
                Ok(profile.map(|p| style::analyze(&ctx.text, &p.style, &self.knowledge.discourse).to_evidence()))
            }));
        }
        if self.config.enable_audience_validation {
            evidence.extend(try_analysis(VALIDATOR_NAME, audience::EVIDENCE_TYPE, || {
                Ok(Some(
                    audience::analyze(&ctx.text, rule_type, domain, domains, &self.patterns).to_evidence(),
                ))
            }));
        }
        evidence
    }
}

/// Decision from the weighted average, branching on rule type.
pub fn make_domain_decision(
    evidence: &[ValidationEvidence],
    rule_type: &str,
) -> (ValidationDecision, f64, String) {
    let Some(avg) = weighted_average_confidence(evidence) else {
        return (
            ValidationDecision::Uncertain,
            NO_EVIDENCE_CONFIDENCE,
            "No domain evidence available".to_string(),
        );
    };
    let has = |types: &[&str]| evidence.iter().any(|e| types.contains(&e.evidence_type.as_str()));

    let (decision, reasoning) = match rule_type {
        "terminology" if avg >= 0.8 && has(&[terminology::EVIDENCE_TYPE, applicability::EVIDENCE_TYPE]) => (
            ValidationDecision::Accept,
            format!("Terminology rule fits the domain (confidence {avg:.2})"),
        ),
        "terminology" if avg < 0.4 => (
            ValidationDecision::Reject,
            format!("Terminology rule does not fit the domain (confidence {avg:.2})"),
        ),
        "style" if avg >= 0.7 && has(&[style::EVIDENCE_TYPE, audience::EVIDENCE_TYPE]) => (
            ValidationDecision::Accept,
            format!("Style rule matches domain expectations (confidence {avg:.2})"),
        ),
        "style" if avg < 0.4 => (
            ValidationDecision::Reject,
            format!("Style rule conflicts with domain expectations (confidence {avg:.2})"),
        ),
        "grammar" | "punctuation" if avg >= 0.6 => (
            ValidationDecision::Accept,
            format!("{rule_type} rules apply in every domain (confidence {avg:.2})"),
        ),
        "terminology" | "style" | "grammar" | "punctuation" => (
            ValidationDecision::Uncertain,
            format!("Domain evidence is inconclusive (confidence {avg:.2})"),
        ),
        _ if avg >= 0.8 => (
            ValidationDecision::Accept,
            format!("Strong domain support (confidence {avg:.2})"),
        ),
        _ if avg < 0.3 => (
            ValidationDecision::Reject,
            format!("Weak domain support (confidence {avg:.2})"),
        ),
        _ => (
            ValidationDecision::Uncertain,
            format!("Domain evidence is inconclusive for rule type '{rule_type}' (confidence {avg:.2})"),
        ),
    };
    (decision, avg, reasoning)
}

impl PassValidator for DomainValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore {
        &mut self.core
    }

    fn validate_inner(&self, ctx: &ValidationContext) -> VerdictResult<ValidationResult> {
        if ctx.text.trim().is_empty() {
            return Ok(ValidationResult::uncertain(
                VALIDATOR_NAME,
                NO_EVIDENCE_CONFIDENCE,
                "No text to analyze",
                ctx,
            ));
        }

        let analysis = self.analyze_domain(ctx);
        let evidence = self.collect_evidence(ctx, &analysis);
        let (decision, confidence, reasoning) = make_domain_decision(&evidence, ctx.rule_type_str());
        Ok(
            ValidationResult::new(VALIDATOR_NAME, decision, confidence, evidence, reasoning, ctx)
                .with_metadata("domain", analysis.primary_domain.as_str())
                .with_metadata("content_type", analysis.content_type.as_str())
                .with_metadata("domain_confidence", analysis.confidence)
                .with_metadata(
                    "domain_source",
                    serde_json::to_value(analysis.source).unwrap_or(Value::Null),
                ),
        )
    }

    fn validator_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            name: VALIDATOR_NAME.to_string(),
            description: "Validates errors against domain conventions, terminology and audience".to_string(),
            version: VERSION.to_string(),
            capabilities: [
                "domain_classification",
                "rule_applicability_assessment",
                "terminology_validation",
                "style_consistency_checking",
                "audience_appropriateness_assessment",
            ]
            .map(String::from)
            .to_vec(),
            specialties: ["terminology", "style", "tone"].map(String::from).to_vec(),
            configuration: serde_json::to_value(&self.config).unwrap_or(Value::Null),
            performance_characteristics: BTreeMap::from([
                (
                    "classifier".to_string(),
                    if self.classifier.is_some() { "injected" } else { "keyword heuristic" }.to_string(),
                ),
                (
                    "caching".to_string(),
                    format!("per (first {DOMAIN_CACHE_KEY_CHARS} chars, content type)"),
                ),
                ("domains".to_string(), self.patterns.domains().collect::<Vec<_>>().join(", ")),
            ]),
        }
    }

    fn analysis_statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics::new(VALIDATOR_NAME)
            .with_cache("domain_analyses", self.cache.stats())
            .with_counter("classifier_fallbacks", self.classifier_fallback_count())
    }

    fn clear_caches(&self) {
        self.cache.clear();
    }

    fn apply_config(&mut self, values: &Map<String, Value>) {
        self.config.apply_overrides(values);
        self.core.set_base_config(self.config.base.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_truncates_on_characters() {
        let text = "é".repeat(150);
        let (prefix, content_type) = domain_cache_key(&text, None);
        assert_eq!(prefix.chars().count(), DOMAIN_CACHE_KEY_CHARS);
        assert_eq!(content_type, "");
        assert_eq!(domain_cache_key("abc", Some("blog")).1, "blog");
    }

    #[test]
    fn grammar_is_accepted_at_point_six() {
        let ev = vec![ValidationEvidence::new(applicability::EVIDENCE_TYPE, 0.65, "a")];
        assert_eq!(make_domain_decision(&ev, "grammar").0, ValidationDecision::Accept);
        assert_eq!(make_domain_decision(&ev, "punctuation").0, ValidationDecision::Accept);
        let weak = vec![ValidationEvidence::new(applicability::EVIDENCE_TYPE, 0.1, "a")];
        assert_eq!(make_domain_decision(&weak, "grammar").0, ValidationDecision::Uncertain);
    }

    #[test]
    fn terminology_accept_needs_domain_evidence() {
        let audience_only = vec![ValidationEvidence::new(audience::EVIDENCE_TYPE, 0.95, "a")];
        assert_eq!(make_domain_decision(&audience_only, "terminology").0, ValidationDecision::Uncertain);
        let terms = vec![ValidationEvidence::new(terminology::EVIDENCE_TYPE, 0.95, "t")];
        assert_eq!(make_domain_decision(&terms, "terminology").0, ValidationDecision::Accept);
    }
}
