/// verdict system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scores at or above this map to `ValidationConfidence::High`.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Scores at or above this (and below HIGH) map to `ValidationConfidence::Medium`.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Default floor used by `ValidationResult::is_decisive` and the decisiveness rate.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Default bound of each validator's history ring buffer.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 1000;

/// Evidence type reserved for internal analysis failures.
pub const ERROR_EVIDENCE_TYPE: &str = "error";

/// Confidence assigned when a validator has no evidence at all.
pub const NO_EVIDENCE_CONFIDENCE: f64 = 0.3;

/// Number of leading characters used in domain-analysis cache keys.
pub const DOMAIN_CACHE_KEY_CHARS: usize = 100;

/// Primary NLP model name.
pub const DEFAULT_NLP_MODEL: &str = "en_rule_based";

/// Fallback NLP model name, tried when the primary fails to load.
pub const FALLBACK_NLP_MODEL: &str = "en_basic";
