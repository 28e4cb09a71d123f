use super::error_code::{self, ErrorCode};

/// Errors raised by an NLP analysis capability.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("NLP model unavailable: {model}")]
    ModelUnavailable { model: String },

    #[error("no NLP model could be loaded (tried {tried})")]
    NoModelLoaded { tried: String },

    #[error("NLP analysis failed: {reason}")]
    AnalysisFailed { reason: String },
}

impl ErrorCode for NlpError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ModelUnavailable { .. } | Self::NoModelLoaded { .. } => {
                error_code::MODEL_UNAVAILABLE
            }
            Self::AnalysisFailed { .. } => error_code::NLP_FAILED,
        }
    }
}
