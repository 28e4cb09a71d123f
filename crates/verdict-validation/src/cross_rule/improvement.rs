//! Net effect of applying every correction flagged in the pass.

use std::collections::BTreeMap;

use serde::Serialize;
use verdict_core::models::{ErrorRecord, ValidationEvidence};

use super::types::ImprovementType;
use crate::knowledge::rules::matches_token_prefixes;
use crate::knowledge::RuleKnowledge;
use crate::text::{clamp_unit, ratio};

pub const EVIDENCE_TYPE: &str = "improvement_assessment";

/// Improvement score floor when no rule targets the dimension.
const IMPROVEMENT_BASELINE: f64 = 0.4;
const SEVERE_WEIGHT: f64 = 0.8;
const REPEATED_TYPE_COUNT: usize = 3;
const UNCATEGORISED: &str = "unknown";

/// Text quality after the corrections, from the mix of error types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub readability: f64,
    pub clarity: f64,
    pub consistency: f64,
    pub correctness: f64,
}

impl QualityMetrics {
    fn from_categories(categories: &[&str]) -> Self {
        Self {
            readability: clamp_unit(1.0 - 0.5 * share(categories, &["style"])),
            clarity: clamp_unit(1.0 - 0.5 * share(categories, &["terminology", "tone"])),
            consistency: clamp_unit(1.0 - 0.4 * share(categories, &["spelling", "punctuation"])),
            correctness: clamp_unit(1.0 - 0.6 * share(categories, &["grammar", "spelling"])),
        }
    }

    pub fn overall(&self) -> f64 {
        0.25 * self.readability + 0.3 * self.clarity + 0.2 * self.consistency + 0.25 * self.correctness
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementAnalysis {
    pub quality: QualityMetrics,
    pub readability_improvement: f64,
    pub clarity_improvement: f64,
    pub consistency_improvement: f64,
    pub error_reduction_rate: f64,
    pub improvement_score: f64,
    pub improvement_type: ImprovementType,
    pub remaining_issues: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub confidence: f64,
}

fn share(categories: &[&str], targets: &[&str]) -> f64 {
    ratio(
        categories.iter().filter(|c| targets.contains(*c)).count(),
        categories.len(),
    )
}

fn category_of<'a>(error: &'a ErrorRecord, knowledge: &'a RuleKnowledge) -> &'a str {
    if !error.rule_type.is_empty() {
        return error.rule_type.as_str();
    }
    knowledge.category_of(&error.rule_name).unwrap_or(UNCATEGORISED)
}

fn keyword_share(names: &[&str], topic: &str, knowledge: &RuleKnowledge) -> f64 {
    let Some(keywords) = knowledge.improvement_keywords.get(topic) else {
        return 0.0;
    };
    let hits = names
        .iter()
        .filter(|n| keywords.iter().any(|k| matches_token_prefixes(n, k)))
        .count();
    ratio(hits, names.len())
}

/// `rules` stand in for the error list when only the current error is known.
pub fn analyze(rules: &[String], errors: &[ErrorRecord], knowledge: &RuleKnowledge) -> ImprovementAnalysis {
    let categories: Vec<&str> = errors.iter().map(|e| category_of(e, knowledge)).collect();
    let quality = QualityMetrics::from_categories(&categories);

    let names: Vec<&str> = if errors.len() >= 2 {
        errors.iter().map(|e| e.rule_name.as_str()).collect()
    } else {
        rules.iter().map(String::as_str).collect()
    };
    let improvement = |topic| {
        let share = keyword_share(&names, topic, knowledge);
        (share, IMPROVEMENT_BASELINE + (1.0 - IMPROVEMENT_BASELINE) * share)
    };
    let (_, readability) = improvement("readability");
    let (clarity_share, clarity) = improvement("clarity");
    let (_, consistency) = improvement("consistency");

    let weights: Vec<f64> = errors.iter().map(|e| knowledge.severity_weight(&e.severity)).collect();
    let average_weight = if weights.is_empty() {
        knowledge.default_severity_weight
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    };
    let error_reduction_rate = clamp_unit(1.0 - average_weight);

    let improvement_score =
        clamp_unit(0.25 * readability + 0.3 * clarity + 0.2 * consistency + 0.25 * error_reduction_rate);

    let mut remaining_issues = Vec::new();
    let severe = weights.iter().filter(|&&w| w >= SEVERE_WEIGHT).count();
    if severe > 0 {
        remaining_issues.push(format!("{severe} high-severity error(s) remain"));
    }
    let mut per_type: BTreeMap<&str, usize> = BTreeMap::new();
    for category in &categories {
        *per_type.entry(*category).or_default() += 1;
    }
    for (category, count) in &per_type {
        if *count >= REPEATED_TYPE_COUNT {
            remaining_issues.push(format!("repeated {category} errors ({count})"));
        }
    }

    let mut improvement_areas = Vec::new();
    if per_type.contains_key("grammar") {
        improvement_areas.push("grammar".to_string());
    }
    if per_type.contains_key("style") || per_type.contains_key("tone") {
        improvement_areas.push("style".to_string());
    }
    if clarity_share > 0.0 {
        improvement_areas.push("clarity".to_string());
    }

    let analyzed = errors.len().max(names.len());
    let confidence = clamp_unit(
        0.5 + (0.04 * analyzed as f64).min(0.2) + 0.3 * (improvement_score - 0.5).abs() * 2.0,
    );

    ImprovementAnalysis {
        quality,
        readability_improvement: readability,
        clarity_improvement: clarity,
        consistency_improvement: consistency,
        error_reduction_rate,
        improvement_score,
        improvement_type: ImprovementType::from_score(improvement_score),
        remaining_issues,
        improvement_areas,
        confidence,
    }
}

impl ImprovementAnalysis {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} improvement (score {:.2}), {} remaining issue(s)",
                self.improvement_type,
                self.improvement_score,
                self.remaining_issues.len()
            ),
        )
        .with_data("improvement_type", self.improvement_type.as_str())
        .with_data("improvement_score", self.improvement_score)
        .with_data(
            "quality_metrics",
            serde_json::to_value(self.quality).unwrap_or(serde_json::Value::Null),
        )
        .with_data("overall_quality", self.quality.overall())
        .with_data("readability_improvement", self.readability_improvement)
        .with_data("clarity_improvement", self.clarity_improvement)
        .with_data("consistency_improvement", self.consistency_improvement)
        .with_data("error_reduction_rate", self.error_reduction_rate)
        .with_data("remaining_issues", self.remaining_issues.clone())
        .with_data("improvement_areas", self.improvement_areas.clone())
    }
}
