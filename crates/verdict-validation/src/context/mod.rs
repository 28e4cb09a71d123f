//! ContextValidator: discourse-level evidence from the sentences around the error.
//!
//! A cheap negative-evidence scan runs first. Quoted, legacy and code spans
//! are rejected before any NLP work when their signals add up past the
//! configured threshold.

pub mod appropriateness;
pub mod coreference;
pub mod discourse;
pub mod negative;
pub mod semantic;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use verdict_core::config::ContextConfig;
use verdict_core::constants::{NO_EVIDENCE_CONFIDENCE, VERSION};
use verdict_core::errors::VerdictResult;
use verdict_core::models::evidence::weighted_average_confidence;
use verdict_core::models::{
    Document, Sentence, Token, ValidationContext, ValidationDecision, ValidationEvidence, ValidationResult,
};
use verdict_core::traits::NlpAnalyzer;

use crate::analysis::{locate_error_sentence, locate_error_token, CachedAnalyzer};
use crate::base::{try_analysis, PassValidator, ValidatorCore};
use crate::introspection::{AnalysisStatistics, ValidatorInfo};
use crate::knowledge::{CompiledSyntaxPatterns, KnowledgeBase};

pub const VALIDATOR_NAME: &str = "context_validator";

pub struct ContextValidator {
    core: ValidatorCore,
    config: ContextConfig,
    analyzer: CachedAnalyzer,
    knowledge: Arc<KnowledgeBase>,
    syntax: CompiledSyntaxPatterns,
    short_circuits: AtomicU64,
}

impl ContextValidator {
    pub fn new() -> VerdictResult<Self> {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> VerdictResult<Self> {
        let analyzer = CachedAnalyzer::load(&config.model_name, &config.fallback_model_name)?;
        Self::build(config, analyzer, Arc::new(KnowledgeBase::default()))
    }

    pub fn with_analyzer(config: ContextConfig, analyzer: Arc<dyn NlpAnalyzer>) -> VerdictResult<Self> {
        Self::build(config, CachedAnalyzer::new(analyzer), Arc::new(KnowledgeBase::default()))
    }

    /// Swap the knowledge base. Its syntax patterns are recompiled.
    pub fn with_knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> VerdictResult<Self> {
        self.syntax = CompiledSyntaxPatterns::compile(&knowledge.discourse.negative)?;
        self.knowledge = knowledge;
        Ok(self)
    }

    fn build(config: ContextConfig, analyzer: CachedAnalyzer, knowledge: Arc<KnowledgeBase>) -> VerdictResult<Self> {
        let syntax = CompiledSyntaxPatterns::compile(&knowledge.discourse.negative)?;
        debug!(model = analyzer.model_name(), "context validator ready");
        Ok(Self {
            core: ValidatorCore::new(VALIDATOR_NAME, config.base.clone()),
            config,
            analyzer,
            knowledge,
            syntax,
            short_circuits: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn analyze_text(&self, text: &str) -> VerdictResult<Arc<Document>> {
        self.analyzer.analyze(text)
    }

    pub fn cache_hits(&self) -> u64 {
        self.analyzer.cache_hits()
    }

    /// Negative-evidence short-circuits taken so far.
    pub fn short_circuit_count(&self) -> u64 {
        self.short_circuits.load(Ordering::Relaxed)
    }

    fn negative_evidence(&self, ctx: &ValidationContext) -> Vec<ValidationEvidence> {
        if !self.config.enable_negative_evidence {
            return Vec::new();
        }
        try_analysis(VALIDATOR_NAME, negative::EVIDENCE_TYPE, || {
            let signals = negative::scan(
                &ctx.text,
                ctx.error_position,
                &ctx.error_text,
                &self.knowledge.discourse.negative,
                &self.syntax,
            );
            Ok(signals.iter().map(negative::NegativeSignal::to_evidence).collect::<Vec<_>>())
        })
    }

    fn context_window<'d>(&self, doc: &'d Document, sentence: &Sentence) -> Vec<&'d Sentence> {
        let size = self.config.context_window_size;
        let first = sentence.index.saturating_sub(size);
        let last = (sentence.index + size + 1).min(doc.sentences.len());
        doc.sentences.get(first..last).map(|s| s.iter().collect()).unwrap_or_default()
    }

    fn collect_evidence(
        &self,
        ctx: &ValidationContext,
        doc: &Document,
        token: &Token,
        window: &[&Sentence],
    ) -> Vec<ValidationEvidence> {
        let discourse_kb = &self.knowledge.discourse;
        let window_tokens: Vec<&Token> = window
            .iter()
            .flat_map(|s| doc.sentence_tokens(s).iter())
            .collect();
        let mut evidence = Vec::new();

        if self.config.enable_coreference {
            evidence.extend(try_analysis(VALIDATOR_NAME, coreference::EVIDENCE_TYPE, || {
                Ok(Some(coreference::analyze(doc, token, window, discourse_kb).to_evidence()))
            }));
        }
        if self.config.enable_discourse_analysis {
            evidence.extend(try_analysis(VALIDATOR_NAME, discourse::EVIDENCE_TYPE, || {
                Ok(Some(discourse::analyze(doc, window, discourse_kb).to_evidence()))
            }));
        }
        if self.config.enable_semantic_consistency {
            let declared = ctx.domain.as_deref().or(ctx.content_type.as_deref());
            evidence.extend(try_analysis(VALIDATOR_NAME, semantic::EVIDENCE_TYPE, || {
                Ok(Some(
                    semantic::analyze(&window_tokens, token, declared, discourse_kb).to_evidence(),
                ))
            }));
        }
        if self.config.enable_appropriateness {
            let sentences: Vec<String> = window.iter().map(|s| doc.sentence_text(s)).collect();
            evidence.extend(try_analysis(VALIDATOR_NAME, appropriateness::EVIDENCE_TYPE, || {
                Ok(Some(
                    appropriateness::analyze(
                        &sentences,
                        ctx.rule_type_str(),
                        ctx.content_type.as_deref(),
                        discourse_kb,
                    )
                    .to_evidence(),
                ))
            }));
        }
        evidence
    }
}

/// Decision from the weighted average, branching on rule type.
pub fn make_context_decision(
    evidence: &[ValidationEvidence],
    rule_type: &str,
) -> (ValidationDecision, f64, String) {
    let Some(avg) = weighted_average_confidence(evidence) else {
        return (
            ValidationDecision::Uncertain,
            NO_EVIDENCE_CONFIDENCE,
            "No contextual evidence available".to_string(),
        );
    };
    let has = |types: &[&str]| evidence.iter().any(|e| types.contains(&e.evidence_type.as_str()));

    let (decision, reasoning) = match rule_type {
        "style" | "tone" if avg >= 0.7 && has(&[appropriateness::EVIDENCE_TYPE, discourse::EVIDENCE_TYPE]) => (
            ValidationDecision::Accept,
            format!("Context supports the {rule_type} error (confidence {avg:.2})"),
        ),
        "style" | "tone" if avg < 0.4 => (
            ValidationDecision::Reject,
            format!("Context does not support the {rule_type} error (confidence {avg:.2})"),
        ),
        "grammar" if avg >= 0.8 && has(&[coreference::EVIDENCE_TYPE, discourse::EVIDENCE_TYPE]) => (
            ValidationDecision::Accept,
            format!("Discourse context supports the grammar error (confidence {avg:.2})"),
        ),
        "grammar" if avg < 0.3 => (
            ValidationDecision::Reject,
            format!("Discourse context contradicts the grammar error (confidence {avg:.2})"),
        ),
        "terminology" if avg >= 0.6 && has(&[semantic::EVIDENCE_TYPE, appropriateness::EVIDENCE_TYPE]) => (
            ValidationDecision::Accept,
            format!("Semantic context supports the terminology error (confidence {avg:.2})"),
        ),
        "style" | "tone" | "grammar" | "terminology" => (
            ValidationDecision::Uncertain,
            format!("Contextual evidence is inconclusive (confidence {avg:.2})"),
        ),
        _ if avg >= 0.8 => (
            ValidationDecision::Accept,
            format!("Strong contextual support (confidence {avg:.2})"),
        ),
        _ if avg < 0.3 => (
            ValidationDecision::Reject,
            format!("Weak contextual support (confidence {avg:.2})"),
        ),
        _ => (
            ValidationDecision::Uncertain,
            format!("Contextual evidence is inconclusive for rule type '{rule_type}' (confidence {avg:.2})"),
        ),
    };
    (decision, avg, reasoning)
}

impl PassValidator for ContextValidator {
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

        let negative_evidence = self.negative_evidence(ctx);
        let negative_total: f64 = negative_evidence.iter().map(|e| e.confidence).sum();
        if !negative_evidence.is_empty() && negative_total >= self.config.negative_evidence_threshold {
            self.short_circuits.fetch_add(1, Ordering::Relaxed);
            debug!(
                validator = VALIDATOR_NAME,
                signals = negative_evidence.len(),
                total = negative_total,
                "negative evidence short-circuit"
            );
            return Ok(ValidationResult::new(
                VALIDATOR_NAME,
                ValidationDecision::Reject,
                negative_total.min(1.0),
                negative_evidence,
                format!("Error sits in a quoted, legacy or code context (negative evidence {negative_total:.2})"),
                ctx,
            )
            .with_metadata("short_circuit", true));
        }

        let doc = self.analyzer.analyze(&ctx.text)?;
        let Some(sentence) = locate_error_sentence(&doc, ctx.error_position, &ctx.error_text) else {
            return Ok(ValidationResult::uncertain(
                VALIDATOR_NAME,
                NO_EVIDENCE_CONFIDENCE,
                "Could not locate error sentence",
                ctx,
            ));
        };
        let Some(token) = locate_error_token(&doc, ctx.error_position, &ctx.error_text) else {
            return Ok(ValidationResult::uncertain(
                VALIDATOR_NAME,
                NO_EVIDENCE_CONFIDENCE,
                "Could not locate error token",
                ctx,
            ));
        };
        let window = self.context_window(&doc, sentence);

        let mut evidence = negative_evidence;
        evidence.extend(self.collect_evidence(ctx, &doc, token, &window));

        let (decision, confidence, reasoning) = make_context_decision(&evidence, ctx.rule_type_str());
        Ok(
            ValidationResult::new(VALIDATOR_NAME, decision, confidence, evidence, reasoning, ctx)
                .with_metadata("sentence_index", sentence.index as u64)
                .with_metadata("context_sentences", window.len() as u64)
                .with_metadata("negative_evidence_total", negative_total)
                .with_metadata("short_circuit", false),
        )
    }

    fn validator_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            name: VALIDATOR_NAME.to_string(),
            description: "Validates errors against discourse context, coreference and register".to_string(),
            version: VERSION.to_string(),
            capabilities: [
                "negative_evidence_detection",
                "coreference_validation",
                "discourse_flow_analysis",
                "semantic_consistency_checking",
                "contextual_appropriateness_assessment",
            ]
            .map(String::from)
            .to_vec(),
            specialties: ["style", "tone", "grammar", "terminology"].map(String::from).to_vec(),
            configuration: serde_json::to_value(&self.config).unwrap_or(Value::Null),
            performance_characteristics: BTreeMap::from([
                ("nlp_model".to_string(), self.analyzer.model_name().to_string()),
                ("caching".to_string(), "per-text document cache".to_string()),
                (
                    "short_circuit".to_string(),
                    format!("negative evidence >= {:.2}", self.config.negative_evidence_threshold),
                ),
            ]),
        }
    }

    fn analysis_statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics::new(VALIDATOR_NAME)
            .with_cache("nlp_documents", self.analyzer.cache_stats())
            .with_counter("negative_evidence_short_circuits", self.short_circuit_count())
    }

    fn clear_caches(&self) {
        self.analyzer.clear();
    }

    fn apply_config(&mut self, values: &Map<String, Value>) {
        self.config.apply_overrides(values);
        self.core.set_base_config(self.config.base.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(evidence_type: &str, confidence: f64) -> ValidationEvidence {
        ValidationEvidence::new(evidence_type, confidence, "test")
    }

    #[test]
    fn style_accept_needs_discourse_or_appropriateness() {
        let only_coref = vec![ev(coreference::EVIDENCE_TYPE, 0.9)];
        assert_eq!(make_context_decision(&only_coref, "style").0, ValidationDecision::Uncertain);
        let with_flow = vec![ev(discourse::EVIDENCE_TYPE, 0.9)];
        assert_eq!(make_context_decision(&with_flow, "tone").0, ValidationDecision::Accept);
    }

    #[test]
    fn terminology_is_never_rejected() {
        let weak = vec![ev(semantic::EVIDENCE_TYPE, 0.05)];
        assert_eq!(make_context_decision(&weak, "terminology").0, ValidationDecision::Uncertain);
    }

    #[test]
    fn grammar_thresholds() {
        assert_eq!(
            make_context_decision(&[ev(coreference::EVIDENCE_TYPE, 0.85)], "grammar").0,
            ValidationDecision::Accept
        );
        assert_eq!(
            make_context_decision(&[ev(coreference::EVIDENCE_TYPE, 0.75)], "grammar").0,
            ValidationDecision::Uncertain
        );
        assert_eq!(
            make_context_decision(&[ev(coreference::EVIDENCE_TYPE, 0.2)], "grammar").0,
            ValidationDecision::Reject
        );
    }

    #[test]
    fn window_is_clipped_to_document() {
        let validator = ContextValidator::new().unwrap();
        let doc = validator.analyze_text("One. Two. Three. Four. Five.").unwrap();
        let window = validator.context_window(&doc, &doc.sentences[0]);
        assert_eq!(window.len(), 4);
        let window = validator.context_window(&doc, &doc.sentences[4]);
        assert_eq!(window.first().map(|s| s.index), Some(1));
    }
}
