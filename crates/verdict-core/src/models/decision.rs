use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD};

/// Adjudication outcome for a flagged error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationDecision {
    /// The flag is a real issue.
    Accept,
    /// The flag is a false positive.
    Reject,
    /// Insufficient signal either way.
    Uncertain,
}

impl ValidationDecision {
    pub const ALL: [ValidationDecision; 3] = [Self::Accept, Self::Reject, Self::Uncertain];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for ValidationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
            Self::Uncertain => "UNCERTAIN",
        })
    }
}

/// Coarse confidence band derived from a `[0, 1]` score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationConfidence {
    High,
    Medium,
    Low,
}

impl ValidationConfidence {
    /// `score >= 0.8` is High, `0.5 <= score < 0.8` is Medium, anything else Low.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ValidationConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(ValidationConfidence::from_score(0.8), ValidationConfidence::High);
        assert_eq!(ValidationConfidence::from_score(0.7999), ValidationConfidence::Medium);
        assert_eq!(ValidationConfidence::from_score(0.5), ValidationConfidence::Medium);
        assert_eq!(ValidationConfidence::from_score(0.4999), ValidationConfidence::Low);
        assert_eq!(ValidationConfidence::from_score(f64::NAN), ValidationConfidence::Low);
    }

    #[test]
    fn decision_display_is_uppercase() {
        assert_eq!(ValidationDecision::Accept.to_string(), "ACCEPT");
        assert_eq!(ValidationDecision::Uncertain.as_str(), "uncertain");
    }
}
