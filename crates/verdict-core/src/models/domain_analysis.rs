use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which path produced a domain analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// An injected `DomainClassifier`.
    Classifier,
    /// The validator's local keyword-pattern heuristic.
    Fallback,
}

/// Genre/register identification for a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAnalysis {
    /// One of technical, business, academic, creative, general (classifiers may add more).
    pub primary_domain: String,
    pub content_type: String,
    pub confidence: f64,
    /// Normalised per-domain scores, when known.
    #[serde(default)]
    pub domain_scores: BTreeMap<String, f64>,
    pub source: AnalysisSource,
}

impl DomainAnalysis {
    pub fn new(primary_domain: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            primary_domain: primary_domain.into(),
            content_type: content_type.into(),
            confidence: 0.5,
            domain_scores: BTreeMap::new(),
            source: AnalysisSource::Classifier,
        }
    }
}
