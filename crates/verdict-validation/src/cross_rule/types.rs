//! Closed level types driving the cross-rule decision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How well a set of errors hangs together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceLevel {
    Incoherent,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl CoherenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Excellent
        } else if score >= 0.75 {
            Self::Good
        } else if score >= 0.6 {
            Self::Moderate
        } else if score >= 0.4 {
            Self::Poor
        } else {
            Self::Incoherent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
            Self::Incoherent => "incoherent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "excellent" => Self::Excellent,
            "good" => Self::Good,
            "moderate" => Self::Moderate,
            "poor" => Self::Poor,
            "incoherent" => Self::Incoherent,
            _ => return None,
        })
    }
}

impl fmt::Display for CoherenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Net effect of applying every correction in the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    Degradation,
    NoImprovement,
    Minimal,
    Moderate,
    Significant,
}

impl ImprovementType {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Significant
        } else if score >= 0.6 {
            Self::Moderate
        } else if score >= 0.4 {
            Self::Minimal
        } else if score >= 0.2 {
            Self::NoImprovement
        } else {
            Self::Degradation
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Significant => "significant",
            Self::Moderate => "moderate",
            Self::Minimal => "minimal",
            Self::NoImprovement => "no_improvement",
            Self::Degradation => "degradation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "significant" => Self::Significant,
            "moderate" => Self::Moderate,
            "minimal" => Self::Minimal,
            "no_improvement" => Self::NoImprovement,
            "degradation" => Self::Degradation,
            _ => return None,
        })
    }
}

impl fmt::Display for ImprovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coherence_thresholds() {
        assert_eq!(CoherenceLevel::from_score(0.95), CoherenceLevel::Excellent);
        assert_eq!(CoherenceLevel::from_score(0.9), CoherenceLevel::Excellent);
        assert_eq!(CoherenceLevel::from_score(0.75), CoherenceLevel::Good);
        assert_eq!(CoherenceLevel::from_score(0.6), CoherenceLevel::Moderate);
        assert_eq!(CoherenceLevel::from_score(0.4), CoherenceLevel::Poor);
        assert_eq!(CoherenceLevel::from_score(0.39), CoherenceLevel::Incoherent);
    }

    #[test]
    fn improvement_thresholds() {
        assert_eq!(ImprovementType::from_score(0.8), ImprovementType::Significant);
        assert_eq!(ImprovementType::from_score(0.79), ImprovementType::Moderate);
        assert_eq!(ImprovementType::from_score(0.4), ImprovementType::Minimal);
        assert_eq!(ImprovementType::from_score(0.2), ImprovementType::NoImprovement);
        assert_eq!(ImprovementType::from_score(0.0), ImprovementType::Degradation);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for level in [CoherenceLevel::Excellent, CoherenceLevel::Poor, CoherenceLevel::Incoherent] {
            assert_eq!(CoherenceLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(ImprovementType::parse("no_improvement"), Some(ImprovementType::NoImprovement));
        assert_eq!(ImprovementType::parse("huge"), None);
    }
}
