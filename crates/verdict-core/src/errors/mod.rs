//! Error handling for verdict.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod nlp_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use nlp_error::NlpError;
pub use validation_error::ValidationError;

/// Convenience alias used throughout the workspace.
pub type VerdictResult<T> = Result<T, ValidationError>;
