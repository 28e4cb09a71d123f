//! The pass-validator contract shared by every validator.
//!
//! A validator implements `validate_inner`; `validate_error` wraps it with
//! timing, failure containment, metric recording and the bounded history.
//! Nothing a validator does, including panicking, escapes `validate_error`.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use verdict_core::config::BaseValidatorConfig;
use verdict_core::errors::{ErrorCode, ValidationError, VerdictResult};
use verdict_core::models::{
    ConfidenceBreakdown, ValidationConfidence, ValidationContext, ValidationDecision,
    ValidationEvidence, ValidationResult,
};
use verdict_core::traits::ConfidenceCalculator;
use verdict_core::{analysis_span, validation_span, ValidationPerformanceMetrics};

use crate::confidence::HeuristicConfidenceCalculator;
use crate::introspection::{AnalysisStatistics, PerformanceSummary, ValidationStatistics, ValidatorInfo};

/// State every validator owns: config, metrics, history and the confidence collaborator.
pub struct ValidatorCore {
    name: String,
    config: BaseValidatorConfig,
    metrics: ValidationPerformanceMetrics,
    history: VecDeque<ValidationResult>,
    confidence_calculator: Arc<dyn ConfidenceCalculator>,
}

impl ValidatorCore {
    /// Fresh core with empty history and the heuristic confidence calculator.
    pub fn new(name: impl Into<String>, config: BaseValidatorConfig) -> Self {
        Self {
            name: name.into(),
            config,
            metrics: ValidationPerformanceMetrics::new(),
            history: VecDeque::new(),
            confidence_calculator: Arc::new(HeuristicConfidenceCalculator),
        }
    }

    /// Validator name used in results and spans.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current base config.
    pub fn config(&self) -> &BaseValidatorConfig {
        &self.config
    }

    /// Replace the base config, trimming the history if its bound shrank.
    pub fn set_base_config(&mut self, config: BaseValidatorConfig) {
        self.config = config;
        self.trim_history();
    }

    /// Accumulated performance metrics.
    pub fn metrics(&self) -> &ValidationPerformanceMetrics {
        &self.metrics
    }

    /// Retained results, oldest first.
    pub fn history(&self) -> &VecDeque<ValidationResult> {
        &self.history
    }

    /// Swap the collaborator used when a context has no precomputed breakdown.
    pub fn set_confidence_calculator(&mut self, calculator: Arc<dyn ConfidenceCalculator>) {
        self.confidence_calculator = calculator;
    }

    /// Collaborator behind `calculate_confidence_score`.
    pub fn confidence_calculator(&self) -> &dyn ConfidenceCalculator {
        self.confidence_calculator.as_ref()
    }

    fn record(&mut self, result: &ValidationResult, failed: bool) {
        if self.config.enable_performance_tracking {
            self.metrics.record(result);
            if failed {
                self.metrics.record_error();
            }
        }
        self.history.push_back(result.clone());
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.config.max_history_size {
            self.history.pop_front();
        }
    }
}

/// One independent validation pass over a flagged error.
pub trait PassValidator: Send + Sync {
    /// Shared state owned by the validator.
    fn core(&self) -> &ValidatorCore;

    /// Mutable access to the shared state.
    fn core_mut(&mut self) -> &mut ValidatorCore;

    /// Validator-specific logic. Errors and panics are contained by `validate_error`.
    fn validate_inner(&self, ctx: &ValidationContext) -> VerdictResult<ValidationResult>;

    /// Static description of the validator and its capabilities.
    fn validator_info(&self) -> ValidatorInfo;

    /// Cache stats and validator-specific counters.
    fn analysis_statistics(&self) -> AnalysisStatistics;

    /// Drop every entry of the validator's analysis caches.
    fn clear_caches(&self);

    /// Apply runtime overrides. Implementations must also update the core's base config.
    fn apply_config(&mut self, values: &Map<String, Value>) {
        let mut base = self.core().config().clone();
        base.apply_overrides(values);
        self.core_mut().set_base_config(base);
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    /// Validate one error. Always returns a well-formed result.
    fn validate_error(&mut self, ctx: &ValidationContext) -> ValidationResult {
        let span = validation_span!(self.name(), ctx.rule_name_str());
        let _guard = span.enter();
        let started = Instant::now();

        let (mut result, failed) = match safely(|| self.validate_inner(ctx)) {
            Ok(result) => (result, false),
            Err(err) => {
                warn!(
                    validator = %self.name(),
                    rule_type = ctx.rule_type_str(),
                    error = %err,
                    "validation failed; returning uncertain result"
                );
                (error_result(self.name(), &err, ctx), true)
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        if result.validation_time <= 0.0 {
            result.validation_time = elapsed;
        }
        debug!(
            validator = %self.name(),
            rule_type = ctx.rule_type_str(),
            decision = %result.decision,
            confidence = result.confidence_score,
            elapsed_us = (elapsed * 1_000_000.0) as u64,
            "validation complete"
        );

        self.core_mut().record(&result, failed);
        result
    }

    /// The context's precomputed breakdown, or one from the confidence collaborator.
    fn calculate_confidence_score(&self, ctx: &ValidationContext) -> ConfidenceBreakdown {
        match &ctx.confidence_breakdown {
            Some(breakdown) => breakdown.clone(),
            None => self.core().confidence_calculator().calculate(
                &ctx.text,
                ctx.error_position,
                ctx.rule_type.as_deref(),
                ctx.content_type.as_deref(),
            ),
        }
    }

    fn convert_confidence_to_level(&self, score: f64) -> ValidationConfidence {
        ValidationConfidence::from_score(score)
    }

    /// Runtime override of `min_confidence_threshold`, `max_history_size` and
    /// validator-specific keys. Unknown keys are kept but ignored.
    fn set_config(&mut self, values: &Map<String, Value>) {
        self.apply_config(values);
        debug!(validator = %self.name(), keys = values.len(), "configuration updated");
    }

    fn get_performance_summary(&self) -> PerformanceSummary {
        let core = self.core();
        PerformanceSummary::from_metrics(
            core.name(),
            core.metrics(),
            core.config().min_confidence_threshold,
            core.history().len(),
            core.config().enable_performance_tracking,
        )
    }

    fn get_validation_statistics(&self) -> ValidationStatistics {
        ValidationStatistics::from_history(self.name(), self.core().history())
    }

    fn get_validator_info(&self) -> ValidatorInfo {
        self.validator_info()
    }

    fn get_analysis_statistics(&self) -> AnalysisStatistics {
        self.analysis_statistics()
    }

    fn validation_history(&self) -> &VecDeque<ValidationResult> {
        self.core().history()
    }

    fn reset_performance_metrics(&mut self) {
        self.core_mut().metrics.reset();
    }

    fn clear_history(&mut self) {
        self.core_mut().history.clear();
    }
}

/// Run `f`, turning a panic into `ValidationError::Panicked`.
pub fn safely<F>(f: F) -> VerdictResult<ValidationResult>
where
    F: FnOnce() -> VerdictResult<ValidationResult>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(ValidationError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Run one sub-analysis. A failure or panic is logged and yields no evidence.
pub fn try_analysis<I, F>(validator: &str, analysis: &str, f: F) -> Vec<ValidationEvidence>
where
    F: FnOnce() -> VerdictResult<I>,
    I: IntoIterator<Item = ValidationEvidence>,
{
    let span = analysis_span!(analysis);
    let _guard = span.enter();
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(items)) => items.into_iter().collect(),
        Ok(Err(err)) => {
            debug!(validator, analysis, error = %err, "sub-analysis failed; skipping its evidence");
            Vec::new()
        }
        Err(payload) => {
            debug!(
                validator,
                analysis,
                panic = %panic_message(payload.as_ref()),
                "sub-analysis panicked; skipping its evidence"
            );
            Vec::new()
        }
    }
}

/// UNCERTAIN result with zero confidence carrying one `"error"` evidence item.
pub fn error_result(validator: &str, err: &ValidationError, ctx: &ValidationContext) -> ValidationResult {
    let evidence = ValidationEvidence::error(err.kind(), &err.to_string(), err.error_code());
    ValidationResult::new(
        validator,
        ValidationDecision::Uncertain,
        0.0,
        vec![evidence],
        format!("Validation failed: {err}"),
        ctx,
    )
    .with_metadata("error_code", err.error_code())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
