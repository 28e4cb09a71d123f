//! Tracing initialization and span definitions.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the verdict tracing/logging system.
///
/// Reads the `VERDICT_LOG` environment variable for per-module levels.
/// Format: `VERDICT_LOG=verdict_validation=debug,verdict_nlp=warn`
///
/// Falls back to `verdict=info` if `VERDICT_LOG` is unset or invalid.
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("VERDICT_LOG").unwrap_or_else(|_| EnvFilter::new("verdict=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Initialize tracing with a custom filter string and JSON output (for embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .json()
            .try_init();
    });
}

/// Create the span wrapped around one `validate_error` call.
#[macro_export]
macro_rules! validation_span {
    ($validator:expr, $rule:expr) => {
        tracing::info_span!("verdict.validation", validator = %$validator, rule = %$rule)
    };
}

/// Create a span for one sub-analysis inside a validator.
#[macro_export]
macro_rules! analysis_span {
    ($analysis:expr) => {
        tracing::debug_span!("verdict.analysis", analysis = %$analysis)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const VALIDATION: &str = "verdict.validation";
    pub const ANALYSIS: &str = "verdict.analysis";
}
