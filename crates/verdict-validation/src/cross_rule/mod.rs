//! CrossRuleValidator: meta-validation of one error against the other rules and
//! errors reported in the same pass.
//!
//! Sibling data arrives through `additional_context["all_rules"]` and
//! `additional_context["all_errors"]`. Without siblings the validator has
//! nothing to say and answers UNCERTAIN.

pub mod coherence;
pub mod conflicts;
pub mod consolidation;
pub mod improvement;
pub mod types;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use verdict_core::config::CrossRuleConfig;
use verdict_core::constants::{NO_EVIDENCE_CONFIDENCE, VERSION};
use verdict_core::errors::VerdictResult;
use verdict_core::models::evidence::weighted_average_confidence;
use verdict_core::models::{ErrorRecord, ValidationContext, ValidationDecision, ValidationEvidence, ValidationResult};
use verdict_core::AnalysisCache;

use crate::base::{try_analysis, PassValidator, ValidatorCore};
use crate::introspection::{AnalysisStatistics, ValidatorInfo};
use crate::knowledge::{CompiledConflictPatterns, KnowledgeBase};

pub use conflicts::ConflictAnalysis;
pub use types::{CoherenceLevel, ImprovementType};

pub const VALIDATOR_NAME: &str = "cross_rule_validator";

pub struct CrossRuleValidator {
    core: ValidatorCore,
    config: CrossRuleConfig,
    knowledge: Arc<KnowledgeBase>,
    patterns: CompiledConflictPatterns,
    /// Keyed by the sorted rule-name list.
    conflict_cache: AnalysisCache<Vec<String>, ConflictAnalysis>,
    conflicts_detected: AtomicU64,
}

impl CrossRuleValidator {
    pub fn new() -> VerdictResult<Self> {
        Self::with_config(CrossRuleConfig::default())
    }

    pub fn with_config(config: CrossRuleConfig) -> VerdictResult<Self> {
        let knowledge = Arc::new(KnowledgeBase::default());
        let patterns = CompiledConflictPatterns::compile(&knowledge.rules)?;
        Ok(Self {
            core: ValidatorCore::new(VALIDATOR_NAME, config.base.clone()),
            config,
            knowledge,
            patterns,
            conflict_cache: AnalysisCache::new(),
            conflicts_detected: AtomicU64::new(0),
        })
    }

    /// Swap the knowledge base. Conflict patterns are recompiled and cached analyses dropped.
    pub fn with_knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> VerdictResult<Self> {
        self.patterns = CompiledConflictPatterns::compile(&knowledge.rules)?;
        self.knowledge = knowledge;
        self.conflict_cache.clear();
        Ok(self)
    }

    pub fn config(&self) -> &CrossRuleConfig {
        &self.config
    }

    pub fn cache_hits(&self) -> u64 {
        self.conflict_cache.hits()
    }

    pub fn conflicts_detected(&self) -> u64 {
        self.conflicts_detected.load(Ordering::Relaxed)
    }

    /// Conflict analysis over the first `max_rules_per_analysis` rules, cached per rule set.
    pub fn analyze_conflicts(&self, rules: &[String]) -> ConflictAnalysis {
        let mut key: Vec<String> = rules
            .iter()
            .take(self.config.max_rules_per_analysis)
            .cloned()
            .collect();
        key.sort();
        self.conflict_cache.get_or_compute(key.clone(), || {
            conflicts::detect(&key, &self.knowledge.rules, &self.patterns)
        })
    }

    fn collect_evidence(&self, rules: &[String], errors: &[ErrorRecord]) -> Vec<ValidationEvidence> {
        let rule_knowledge = &self.knowledge.rules;
        let mut evidence = Vec::new();

        if self.config.enable_conflict_detection && rules.len() >= 2 {
            evidence.extend(try_analysis(VALIDATOR_NAME, conflicts::EVIDENCE_TYPE, || {
                let analysis = self.analyze_conflicts(rules);
                if !analysis.conflicts.is_empty() {
                    self.conflicts_detected
                        .fetch_add(analysis.conflicts.len() as u64, Ordering::Relaxed);
                    debug!(
                        validator = VALIDATOR_NAME,
                        conflicts = analysis.conflicts.len(),
                        severity = analysis.severity_str(),
                        "rule conflicts detected"
                    );
                }
                Ok(Some(analysis.to_evidence()))
            }));
        }
        if self.config.enable_coherence_validation && errors.len() >= 2 {
            evidence.extend(try_analysis(VALIDATOR_NAME, coherence::EVIDENCE_TYPE, || {
                Ok(Some(coherence::analyze(errors, rule_knowledge, &self.patterns).to_evidence()))
            }));
        }
        if self.config.enable_consolidation_validation && errors.len() >= 2 {
            evidence.extend(try_analysis(VALIDATOR_NAME, consolidation::EVIDENCE_TYPE, || {
                Ok(Some(consolidation::analyze(errors, rule_knowledge).to_evidence()))
            }));
        }
        if self.config.enable_improvement_assessment && (rules.len() >= 2 || errors.len() >= 2) {
            evidence.extend(try_analysis(VALIDATOR_NAME, improvement::EVIDENCE_TYPE, || {
                Ok(Some(improvement::analyze(rules, errors, rule_knowledge).to_evidence()))
            }));
        }
        evidence
    }
}

fn find<'a>(evidence: &'a [ValidationEvidence], evidence_type: &str) -> Option<&'a ValidationEvidence> {
    evidence.iter().find(|e| e.evidence_type == evidence_type)
}

/// Conflict evidence decides first, then coherence, then improvement, then the plain average.
pub fn make_cross_rule_decision(evidence: &[ValidationEvidence]) -> (ValidationDecision, f64, String) {
    let Some(avg) = weighted_average_confidence(evidence) else {
        return (
            ValidationDecision::Uncertain,
            NO_EVIDENCE_CONFIDENCE,
            "No cross-rule evidence available".to_string(),
        );
    };

    if let Some(conflict) = find(evidence, conflicts::EVIDENCE_TYPE) {
        let severity = conflict.data_str("conflict_severity").unwrap_or("none");
        let strategy = conflict.data_str("resolution_strategy").unwrap_or_default();
        let (decision, reasoning) = match severity {
            "critical" => (
                ValidationDecision::Reject,
                format!("Critical conflict with another rule in this pass ({strategy})"),
            ),
            "severe" => (
                ValidationDecision::Uncertain,
                format!("Severe conflict with another rule in this pass ({strategy})"),
            ),
            _ if avg >= 0.8 => (
                ValidationDecision::Accept,
                format!("Rule coexists with the rest of the pass (confidence {avg:.2})"),
            ),
            _ => (
                ValidationDecision::Uncertain,
                format!("Rule interactions are inconclusive ({severity} conflicts, confidence {avg:.2})"),
            ),
        };
        return (decision, avg, reasoning);
    }

    if let Some(level) = find(evidence, coherence::EVIDENCE_TYPE)
        .and_then(|e| e.data_str("coherence_level"))
        .and_then(CoherenceLevel::parse)
    {
        let decision = match level {
            CoherenceLevel::Excellent | CoherenceLevel::Good => ValidationDecision::Accept,
            CoherenceLevel::Moderate if avg >= 0.7 => ValidationDecision::Accept,
            CoherenceLevel::Moderate => ValidationDecision::Uncertain,
            CoherenceLevel::Poor | CoherenceLevel::Incoherent if avg < 0.4 => ValidationDecision::Reject,
            CoherenceLevel::Poor | CoherenceLevel::Incoherent => ValidationDecision::Uncertain,
        };
        return (
            decision,
            avg,
            format!("Errors in this pass show {level} coherence (confidence {avg:.2})"),
        );
    }

    if let Some(kind) = find(evidence, improvement::EVIDENCE_TYPE)
        .and_then(|e| e.data_str("improvement_type"))
        .and_then(ImprovementType::parse)
    {
        let decision = match kind {
            ImprovementType::Significant | ImprovementType::Moderate => ValidationDecision::Accept,
            ImprovementType::Minimal => ValidationDecision::Uncertain,
            ImprovementType::NoImprovement | ImprovementType::Degradation => ValidationDecision::Reject,
        };
        return (
            decision,
            avg,
            format!("Corrections in this pass yield {kind} improvement (confidence {avg:.2})"),
        );
    }

    let decision = if avg >= 0.8 {
        ValidationDecision::Accept
    } else if avg >= 0.6 {
        ValidationDecision::Uncertain
    } else {
        ValidationDecision::Reject
    };
    (decision, avg, format!("Cross-rule confidence {avg:.2}"))
}

impl PassValidator for CrossRuleValidator {
    fn core(&self) -> &ValidatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ValidatorCore {
        &mut self.core
    }

    fn validate_inner(&self, ctx: &ValidationContext) -> VerdictResult<ValidationResult> {
        let rules = ctx.all_rules();
        let errors = ctx.all_errors();
        if rules.len() <= 1 && errors.len() <= 1 {
            return Ok(ValidationResult::uncertain(
                VALIDATOR_NAME,
                NO_EVIDENCE_CONFIDENCE,
                "No multiple rules or errors found",
                ctx,
            ));
        }

        let evidence = self.collect_evidence(&rules, &errors);
        let (decision, confidence, reasoning) = make_cross_rule_decision(&evidence);
        Ok(
            ValidationResult::new(VALIDATOR_NAME, decision, confidence, evidence, reasoning, ctx)
                .with_metadata("rules_analyzed", rules.len() as u64)
                .with_metadata("errors_analyzed", errors.len() as u64),
        )
    }

    fn validator_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            name: VALIDATOR_NAME.to_string(),
            description: "Validates errors against the other rules and errors of the same pass".to_string(),
            version: VERSION.to_string(),
            capabilities: [
                "rule_conflict_detection",
                "error_coherence_validation",
                "consolidation_quality_assessment",
                "improvement_assessment",
            ]
            .map(String::from)
            .to_vec(),
            specialties: ["meta_validation", "rule_interaction"].map(String::from).to_vec(),
            configuration: serde_json::to_value(&self.config).unwrap_or(Value::Null),
            performance_characteristics: BTreeMap::from([
                ("caching".to_string(), "conflict analyses per sorted rule set".to_string()),
                (
                    "pairwise_cost".to_string(),
                    format!("quadratic in rules, capped at {}", self.config.max_rules_per_analysis),
                ),
            ]),
        }
    }

    fn analysis_statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics::new(VALIDATOR_NAME)
            .with_cache("conflict_analyses", self.conflict_cache.stats())
            .with_counter("conflicts_detected", self.conflicts_detected())
    }

    fn clear_caches(&self) {
        self.conflict_cache.clear();
    }

    fn apply_config(&mut self, values: &Map<String, Value>) {
        self.config.apply_overrides(values);
        self.core.set_base_config(self.config.base.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(evidence_type: &str, confidence: f64, key: &str, value: &str) -> ValidationEvidence {
        ValidationEvidence::new(evidence_type, confidence, "test").with_data(key, value)
    }

    #[test]
    fn conflict_severity_drives_the_decision() {
        let critical = [ev(conflicts::EVIDENCE_TYPE, 0.9, "conflict_severity", "critical")];
        assert_eq!(make_cross_rule_decision(&critical).0, ValidationDecision::Reject);
        let severe = [ev(conflicts::EVIDENCE_TYPE, 0.9, "conflict_severity", "severe")];
        assert_eq!(make_cross_rule_decision(&severe).0, ValidationDecision::Uncertain);
        let none = [ev(conflicts::EVIDENCE_TYPE, 0.85, "conflict_severity", "none")];
        assert_eq!(make_cross_rule_decision(&none).0, ValidationDecision::Accept);
    }

    #[test]
    fn conflict_evidence_outranks_coherence() {
        let evidence = [
            ev(coherence::EVIDENCE_TYPE, 0.2, "coherence_level", "incoherent"),
            ev(conflicts::EVIDENCE_TYPE, 0.6, "conflict_severity", "minor"),
        ];
        assert_eq!(make_cross_rule_decision(&evidence).0, ValidationDecision::Uncertain);
    }

    #[test]
    fn coherence_then_improvement_then_average() {
        let moderate = [ev(coherence::EVIDENCE_TYPE, 0.65, "coherence_level", "moderate")];
        assert_eq!(make_cross_rule_decision(&moderate).0, ValidationDecision::Uncertain);
        let poor = [ev(coherence::EVIDENCE_TYPE, 0.3, "coherence_level", "poor")];
        assert_eq!(make_cross_rule_decision(&poor).0, ValidationDecision::Reject);

        let minimal = [ev(improvement::EVIDENCE_TYPE, 0.9, "improvement_type", "minimal")];
        assert_eq!(make_cross_rule_decision(&minimal).0, ValidationDecision::Uncertain);
        let degraded = [ev(improvement::EVIDENCE_TYPE, 0.9, "improvement_type", "degradation")];
        assert_eq!(make_cross_rule_decision(&degraded).0, ValidationDecision::Reject);

        let plain = [ValidationEvidence::new(consolidation::EVIDENCE_TYPE, 0.65, "c")];
        assert_eq!(make_cross_rule_decision(&plain).0, ValidationDecision::Uncertain);
        assert_eq!(make_cross_rule_decision(&[]).1, NO_EVIDENCE_CONFIDENCE);
    }

    #[test]
    fn conflict_cache_ignores_rule_order() {
        let validator = CrossRuleValidator::new().unwrap();
        let a = validator.analyze_conflicts(&["wordiness".into(), "sentence_length".into()]);
        let b = validator.analyze_conflicts(&["sentence_length".into(), "wordiness".into()]);
        assert_eq!(a, b);
        assert_eq!(validator.cache_hits(), 1);
    }
}
