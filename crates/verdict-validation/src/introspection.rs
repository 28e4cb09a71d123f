//! Read-only snapshots exposed by every validator.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use verdict_core::cache::CacheStats;
use verdict_core::models::{ValidationConfidence, ValidationDecision, ValidationResult};
use verdict_core::ValidationPerformanceMetrics;

/// Static description of a validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub capabilities: Vec<String>,
    pub specialties: Vec<String>,
    pub configuration: Value,
    pub performance_characteristics: BTreeMap<String, String>,
}

/// Live counters from the performance metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub validator_name: String,
    pub total_validations: u64,
    pub decision_counts: BTreeMap<String, u64>,
    pub decision_rates: BTreeMap<String, f64>,
    pub average_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub average_confidence: f64,
    pub decisiveness_rate: f64,
    pub validation_errors: u64,
    pub error_rate: f64,
    pub history_size: usize,
    pub performance_tracking_enabled: bool,
}

impl PerformanceSummary {
    pub fn from_metrics(
        validator_name: &str,
        metrics: &ValidationPerformanceMetrics,
        decisiveness_floor: f64,
        history_size: usize,
        performance_tracking_enabled: bool,
    ) -> Self {
        let mut decision_counts = BTreeMap::new();
        let mut decision_rates = BTreeMap::new();
        for decision in ValidationDecision::ALL {
            decision_counts.insert(decision.as_str().to_string(), metrics.decision_count(decision));
            decision_rates.insert(decision.as_str().to_string(), metrics.decision_rate(decision));
        }
        Self {
            validator_name: validator_name.to_string(),
            total_validations: metrics.total_validations,
            decision_counts,
            decision_rates,
            average_time: metrics.average_time(),
            min_time: metrics.min_time(),
            max_time: metrics.max_time(),
            average_confidence: metrics.average_confidence(),
            decisiveness_rate: metrics.decisiveness_rate(decisiveness_floor),
            validation_errors: metrics.validation_errors,
            error_rate: metrics.error_rate(),
            history_size,
            performance_tracking_enabled,
        }
    }
}

/// Per-rule-type aggregate over the retained history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleTypeStatistics {
    pub count: usize,
    pub average_confidence: f64,
}

/// Distributions computed over the retained history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationStatistics {
    pub validator_name: String,
    pub history_size: usize,
    pub decision_distribution: BTreeMap<String, usize>,
    pub confidence_distribution: BTreeMap<String, usize>,
    pub rule_types: BTreeMap<String, RuleTypeStatistics>,
    pub evidence_types: BTreeMap<String, usize>,
    /// Summaries of the most recent results, oldest first.
    pub recent: Vec<String>,
}

/// How many recent summaries `ValidationStatistics` carries.
pub const RECENT_RESULTS: usize = 10;

impl ValidationStatistics {
    pub fn from_history<'a, I>(validator_name: &str, history: I) -> Self
    where
        I: IntoIterator<Item = &'a ValidationResult>,
        I::IntoIter: ExactSizeIterator,
    {
        let history = history.into_iter();
        let history_size = history.len();

        let mut decision_distribution: BTreeMap<String, usize> = ValidationDecision::ALL
            .iter()
            .map(|d| (d.as_str().to_string(), 0))
            .collect();
        let mut confidence_distribution: BTreeMap<String, usize> =
            [ValidationConfidence::High, ValidationConfidence::Medium, ValidationConfidence::Low]
                .iter()
                .map(|c| (c.as_str().to_string(), 0))
                .collect();
        let mut rule_totals: BTreeMap<String, (usize, f64)> = BTreeMap::new();
        let mut evidence_types: BTreeMap<String, usize> = BTreeMap::new();
        let mut recent = Vec::new();

        for (i, result) in history.enumerate() {
            *decision_distribution
                .entry(result.decision.as_str().to_string())
                .or_default() += 1;
            *confidence_distribution
                .entry(result.confidence.as_str().to_string())
                .or_default() += 1;
            let rule_type = result.rule_type.clone().unwrap_or_else(|| "unknown".to_string());
            let entry = rule_totals.entry(rule_type).or_default();
            entry.0 += 1;
            entry.1 += result.confidence_score;
            for evidence in &result.evidence {
                *evidence_types.entry(evidence.evidence_type.clone()).or_default() += 1;
            }
            if i + RECENT_RESULTS >= history_size {
                recent.push(result.summary());
            }
        }

        let rule_types = rule_totals
            .into_iter()
            .map(|(rule_type, (count, total))| {
                (
                    rule_type,
                    RuleTypeStatistics {
                        count,
                        average_confidence: total / count as f64,
                    },
                )
            })
            .collect();

        Self {
            validator_name: validator_name.to_string(),
            history_size,
            decision_distribution,
            confidence_distribution,
            rule_types,
            evidence_types,
            recent,
        }
    }
}

/// Cache and validator-specific counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisStatistics {
    pub validator_name: String,
    pub caches: BTreeMap<String, CacheStats>,
    pub counters: BTreeMap<String, u64>,
}

impl AnalysisStatistics {
    pub fn new(validator_name: &str) -> Self {
        Self {
            validator_name: validator_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_cache(mut self, name: &str, stats: CacheStats) -> Self {
        self.caches.insert(name.to_string(), stats);
        self
    }

    pub fn with_counter(mut self, name: &str, value: u64) -> Self {
        self.counters.insert(name.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::models::{ValidationContext, ValidationEvidence};

    fn result(decision: ValidationDecision, score: f64, rule_type: &str) -> ValidationResult {
        let ctx = ValidationContext::new("text", 0, "text").with_rule(rule_type, "r");
        ValidationResult::new(
            "v",
            decision,
            score,
            vec![ValidationEvidence::new("pos_tagging", score, "d")],
            "why",
            &ctx,
        )
    }

    #[test]
    fn statistics_over_history() {
        let history = vec![
            result(ValidationDecision::Accept, 0.9, "grammar"),
            result(ValidationDecision::Uncertain, 0.4, "grammar"),
            result(ValidationDecision::Reject, 0.6, "style"),
        ];
        let stats = ValidationStatistics::from_history("v", &history);
        assert_eq!(stats.history_size, 3);
        assert_eq!(stats.decision_distribution["accept"], 1);
        assert_eq!(stats.confidence_distribution["high"], 1);
        assert_eq!(stats.confidence_distribution["low"], 1);
        assert_eq!(stats.rule_types["grammar"].count, 2);
        assert!((stats.rule_types["grammar"].average_confidence - 0.65).abs() < 1e-9);
        assert_eq!(stats.evidence_types["pos_tagging"], 3);
        assert_eq!(stats.recent.len(), 3);
    }

    #[test]
    fn recent_is_capped() {
        let history: Vec<_> = (0..25)
            .map(|_| result(ValidationDecision::Accept, 0.9, "grammar"))
            .collect();
        let stats = ValidationStatistics::from_history("v", &history);
        assert_eq!(stats.recent.len(), RECENT_RESULTS);
    }
}
