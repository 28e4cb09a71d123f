//! Linguistic knowledge consumed by the validators.
//!
//! Every word list, lookup table and pattern set lives here as plain data.
//! `KnowledgeBase::default()` carries the built-in tables; a TOML document
//! can override any subset of them (missing fields keep their defaults).

pub mod discourse;
pub mod domains;
pub mod morphology;
pub mod patterns;
pub mod rules;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use verdict_core::errors::ConfigError;

pub use discourse::{DiscourseKnowledge, NegativeEvidenceKnowledge};
pub use domains::{AudienceOverride, AudienceProfile, DomainKnowledge, DomainProfile, StyleExpectation};
pub use morphology::{Interpretation, MorphologyKnowledge};
pub use patterns::{CompiledConflictPatterns, CompiledDomainPatterns, CompiledSyntaxPatterns};
pub use rules::{ConflictPattern, ConflictSeverity, KnownConflict, RuleKnowledge};

/// All tables, grouped by the validator that primarily reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    pub morphology: MorphologyKnowledge,
    pub discourse: DiscourseKnowledge,
    pub domains: DomainKnowledge,
    pub rules: RuleKnowledge,
}

impl KnowledgeBase {
    /// Parse a (possibly partial) TOML document over the defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

pub(crate) fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

pub(crate) fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, words)| ((*key).to_string(), list(words)))
        .collect()
}

pub(crate) fn scores(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}
