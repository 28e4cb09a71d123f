//! MorphologicalValidator: POS, dependency and ambiguity evidence from an NLP
//! analysis of the sentence around the flagged token.

pub mod ambiguity;
pub mod dependency;
pub mod pos;
pub mod verification;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use verdict_core::config::MorphologicalConfig;
use verdict_core::constants::{NO_EVIDENCE_CONFIDENCE, VERSION};
use verdict_core::errors::VerdictResult;
use verdict_core::models::evidence::weighted_average_confidence;
use verdict_core::models::{
    Document, Token, ValidationContext, ValidationDecision, ValidationEvidence, ValidationResult,
};
use verdict_core::traits::NlpAnalyzer;

use crate::analysis::{locate_error_token, CachedAnalyzer};
use crate::base::{try_analysis, PassValidator, ValidatorCore};
use crate::introspection::{AnalysisStatistics, ValidatorInfo};
use crate::knowledge::KnowledgeBase;

pub const VALIDATOR_NAME: &str = "morphological_validator";

/// Tokens on each side of the error token, within its sentence.
#[derive(Debug, Clone, Default)]
pub struct TokenWindow<'a> {
    pub left: Vec<&'a Token>,
    pub right: Vec<&'a Token>,
}

impl<'a> TokenWindow<'a> {
    pub fn around(doc: &'a Document, token: &Token, radius: usize) -> Self {
        let Some(sentence) = doc.sentence_of(token) else {
            return Self::default();
        };
        let tokens = doc.sentence_tokens(sentence);
        let offset = token.index.saturating_sub(sentence.start_token);
        let left_start = offset.saturating_sub(radius);
        let right_end = (offset + 1 + radius).min(tokens.len());
        Self {
            left: tokens[left_start..offset.min(tokens.len())].iter().collect(),
            right: tokens[(offset + 1).min(right_end)..right_end].iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct MorphologicalValidator {
    core: ValidatorCore,
    config: MorphologicalConfig,
    analyzer: CachedAnalyzer,
    knowledge: Arc<KnowledgeBase>,
    unlocated_tokens: AtomicU64,
}

impl MorphologicalValidator {
    /// Loads the configured NLP model, or its fallback. Fails if neither loads.
    pub fn new() -> VerdictResult<Self> {
        Self::with_config(MorphologicalConfig::default())
    }

    pub fn with_config(config: MorphologicalConfig) -> VerdictResult<Self> {
        let analyzer = CachedAnalyzer::load(&config.model_name, &config.fallback_model_name)?;
        Ok(Self::build(config, analyzer))
    }

    /// Use an already constructed analyzer instead of loading one by name.
    pub fn with_analyzer(config: MorphologicalConfig, analyzer: Arc<dyn NlpAnalyzer>) -> Self {
        Self::build(config, CachedAnalyzer::new(analyzer))
    }

    fn build(config: MorphologicalConfig, analyzer: CachedAnalyzer) -> Self {
        debug!(model = analyzer.model_name(), "morphological validator ready");
        Self {
            core: ValidatorCore::new(VALIDATOR_NAME, config.base.clone()),
            config,
            analyzer,
            knowledge: Arc::new(KnowledgeBase::default()),
            unlocated_tokens: AtomicU64::new(0),
        }
    }

    pub fn with_knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn config(&self) -> &MorphologicalConfig {
        &self.config
    }

    /// NLP analysis of `text`, served from the cache when possible.
    pub fn analyze_text(&self, text: &str) -> VerdictResult<Arc<Document>> {
        self.analyzer.analyze(text)
    }

    pub fn cache_hits(&self) -> u64 {
        self.analyzer.cache_hits()
    }

    fn collect_evidence(&self, doc: &Document, token: &Token, rule_type: &str) -> Vec<ValidationEvidence> {
        let knowledge = &self.knowledge.morphology;
        let window = TokenWindow::around(doc, token, self.config.context_window_tokens);
        let mut evidence = Vec::new();

        evidence.extend(try_analysis(VALIDATOR_NAME, pos::EVIDENCE_TYPE, || {
            Ok(Some(pos::analyze(token, &window, rule_type, knowledge).to_evidence()))
        }));
        if self.config.enable_dependency_parsing {
            evidence.extend(try_analysis(VALIDATOR_NAME, dependency::EVIDENCE_TYPE, || {
                Ok(Some(dependency::analyze(doc, token, rule_type, knowledge).to_evidence()))
            }));
        }
        if self.config.enable_ambiguity_detection {
            evidence.extend(try_analysis(VALIDATOR_NAME, ambiguity::EVIDENCE_TYPE, || {
                Ok(ambiguity::analyze(doc, token, knowledge).map(|a| a.to_evidence()))
            }));
        }
        if self.config.enable_cross_verification {
            evidence.extend(try_analysis(VALIDATOR_NAME, verification::EVIDENCE_TYPE, || {
                Ok(verification::analyze(token, &window, rule_type, knowledge).map(|v| v.to_evidence()))
            }));
        }
        evidence
    }
}

/// Decision from the weighted average, branching on rule type.
pub fn make_morphological_decision(
    evidence: &[ValidationEvidence],
    rule_type: &str,
) -> (ValidationDecision, f64, String) {
    let Some(avg) = weighted_average_confidence(evidence) else {
        return (
            ValidationDecision::Uncertain,
            NO_EVIDENCE_CONFIDENCE,
            "No morphological evidence available".to_string(),
        );
    };
    let structural = evidence
        .iter()
        .any(|e| e.evidence_type == pos::EVIDENCE_TYPE || e.evidence_type == dependency::EVIDENCE_TYPE);

    let (decision, reasoning) = match rule_type {
        "grammar" if avg >= 0.7 && structural => (
            ValidationDecision::Accept,
            format!("Morphological analysis supports the grammar error (confidence {avg:.2})"),
        ),
        "grammar" if avg < 0.4 => (
            ValidationDecision::Reject,
            format!("Morphological analysis contradicts the grammar error (confidence {avg:.2})"),
        ),
        "style" if avg >= 0.6 => (
            ValidationDecision::Accept,
            format!("Morphological analysis supports the style error (confidence {avg:.2})"),
        ),
        "grammar" | "style" => (
            ValidationDecision::Uncertain,
            format!("Morphological evidence is inconclusive (confidence {avg:.2})"),
        ),
        _ if avg >= 0.8 => (
            ValidationDecision::Accept,
            format!("Strong morphological support (confidence {avg:.2})"),
        ),
        _ if avg < 0.3 => (
            ValidationDecision::Reject,
            format!("Weak morphological support (confidence {avg:.2})"),
        ),
        _ => (
            ValidationDecision::Uncertain,
            format!("Morphological evidence is inconclusive for rule type '{rule_type}' (confidence {avg:.2})"),
        ),
    };
    (decision, avg, reasoning)
}

impl PassValidator for MorphologicalValidator {
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

        let doc = self.analyzer.analyze(&ctx.text)?;
        let Some(token) = locate_error_token(&doc, ctx.error_position, &ctx.error_text) else {
            self.unlocated_tokens.fetch_add(1, Ordering::Relaxed);
            return Ok(ValidationResult::uncertain(
                VALIDATOR_NAME,
                NO_EVIDENCE_CONFIDENCE,
                "Could not locate error token",
                ctx,
            ));
        };

        let evidence = self.collect_evidence(&doc, token, ctx.rule_type_str());
        let (decision, confidence, reasoning) = make_morphological_decision(&evidence, ctx.rule_type_str());
        Ok(
            ValidationResult::new(VALIDATOR_NAME, decision, confidence, evidence, reasoning, ctx)
                .with_metadata("token", token.text.as_str())
                .with_metadata("token_index", token.index as u64)
                .with_metadata("model", self.analyzer.model_name()),
        )
    }

    fn validator_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            name: VALIDATOR_NAME.to_string(),
            description: "Validates errors using part-of-speech, dependency and morphological ambiguity analysis"
                .to_string(),
            version: VERSION.to_string(),
            capabilities: [
                "pos_tagging",
                "dependency_parsing",
                "morphological_ambiguity_detection",
                "cross_model_verification",
            ]
            .map(String::from)
            .to_vec(),
            specialties: ["grammar", "style"].map(String::from).to_vec(),
            configuration: serde_json::to_value(&self.config).unwrap_or(Value::Null),
            performance_characteristics: BTreeMap::from([
                ("nlp_model".to_string(), self.analyzer.model_name().to_string()),
                ("caching".to_string(), "per-text document cache".to_string()),
                ("cost".to_string(), "one NLP pass per distinct text".to_string()),
            ]),
        }
    }

    fn analysis_statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics::new(VALIDATOR_NAME)
            .with_cache("nlp_documents", self.analyzer.cache_stats())
            .with_counter("unlocated_tokens", self.unlocated_tokens.load(Ordering::Relaxed))
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

    #[test]
    fn window_stays_inside_the_sentence() {
        let analyzer = CachedAnalyzer::load("en_rule_based", "en_basic").unwrap();
        let doc = analyzer
            .analyze("The documentation is comprehensive. It covers all topics thoroughly.")
            .unwrap();
        let it = &doc.tokens[5];
        let window = TokenWindow::around(&doc, it, 3);
        assert!(window.left.is_empty());
        assert_eq!(window.right.len(), 3);
        assert!(window.iter().all(|t| t.sentence == 1));
    }

    #[test]
    fn no_evidence_is_uncertain_at_floor() {
        let (decision, confidence, _) = make_morphological_decision(&[], "grammar");
        assert_eq!(decision, ValidationDecision::Uncertain);
        assert_eq!(confidence, NO_EVIDENCE_CONFIDENCE);
    }

    #[test]
    fn style_is_never_rejected() {
        let weak = vec![ValidationEvidence::new(pos::EVIDENCE_TYPE, 0.1, "weak")];
        let (decision, _, _) = make_morphological_decision(&weak, "style");
        assert_eq!(decision, ValidationDecision::Uncertain);
    }

    #[test]
    fn grammar_accept_needs_structural_evidence() {
        let only_ambiguity = vec![ValidationEvidence::new(ambiguity::EVIDENCE_TYPE, 0.9, "a")];
        assert_eq!(
            make_morphological_decision(&only_ambiguity, "grammar").0,
            ValidationDecision::Uncertain
        );
        let with_pos = vec![ValidationEvidence::new(pos::EVIDENCE_TYPE, 0.9, "p")];
        assert_eq!(make_morphological_decision(&with_pos, "grammar").0, ValidationDecision::Accept);
    }

    #[test]
    fn other_rule_types_are_conservative() {
        let mid = vec![ValidationEvidence::new(pos::EVIDENCE_TYPE, 0.75, "p")];
        assert_eq!(make_morphological_decision(&mid, "spelling").0, ValidationDecision::Uncertain);
        let low = vec![ValidationEvidence::new(pos::EVIDENCE_TYPE, 0.2, "p")];
        assert_eq!(make_morphological_decision(&low, "spelling").0, ValidationDecision::Reject);
    }
}
