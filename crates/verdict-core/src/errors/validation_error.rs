use super::error_code::{self, ErrorCode};
use super::{ConfigError, NlpError};

/// Errors surfaced by validator internals.
///
/// None of these ever escape `validate_error`; they are converted into an
/// UNCERTAIN result carrying a single `"error"` evidence item.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("analysis failed in {analysis}: {reason}")]
    AnalysisFailed { analysis: String, reason: String },

    #[error("invalid validation input: {reason}")]
    InvalidInput { reason: String },

    #[error("collaborator {collaborator} failed: {reason}")]
    CollaboratorFailed {
        collaborator: String,
        reason: String,
    },

    #[error("invalid knowledge base entry {entry}: {reason}")]
    InvalidKnowledge { entry: String, reason: String },

    #[error("validator panicked: {message}")]
    Panicked { message: String },

    #[error("NLP error: {0}")]
    Nlp(#[from] NlpError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ValidationError {
    /// Short variant name used as `error_type` in error evidence.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AnalysisFailed { .. } => "AnalysisFailed",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::CollaboratorFailed { .. } => "CollaboratorFailed",
            Self::InvalidKnowledge { .. } => "InvalidKnowledge",
            Self::Panicked { .. } => "Panicked",
            Self::Nlp(_) => "NlpError",
            Self::Config(_) => "ConfigError",
        }
    }

    pub fn analysis(analysis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AnalysisFailed {
            analysis: analysis.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AnalysisFailed { .. } => error_code::ANALYSIS_FAILED,
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::CollaboratorFailed { .. } => error_code::COLLABORATOR_FAILED,
            Self::InvalidKnowledge { .. } => error_code::KNOWLEDGE_INVALID,
            Self::Panicked { .. } => error_code::PANICKED,
            Self::Nlp(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
