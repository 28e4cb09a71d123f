//! Stable string codes carried into `"error"` evidence.

pub const ANALYSIS_FAILED: &str = "VERDICT_ANALYSIS_FAILED";
pub const INVALID_INPUT: &str = "VERDICT_INVALID_INPUT";
pub const COLLABORATOR_FAILED: &str = "VERDICT_COLLABORATOR_FAILED";
pub const MODEL_UNAVAILABLE: &str = "VERDICT_MODEL_UNAVAILABLE";
pub const NLP_FAILED: &str = "VERDICT_NLP_FAILED";
pub const CONFIG_PARSE: &str = "VERDICT_CONFIG_PARSE";
pub const CONFIG_INVALID: &str = "VERDICT_CONFIG_INVALID";
pub const CONFIG_NOT_FOUND: &str = "VERDICT_CONFIG_NOT_FOUND";
pub const KNOWLEDGE_INVALID: &str = "VERDICT_KNOWLEDGE_INVALID";
pub const PANICKED: &str = "VERDICT_PANICKED";

/// Implemented by every verdict error enum.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
