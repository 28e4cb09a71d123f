//! Model registry and construction-time fallback policy.

use std::sync::Arc;

use tracing::{info, warn};

use verdict_core::constants::{DEFAULT_NLP_MODEL, FALLBACK_NLP_MODEL};
use verdict_core::errors::NlpError;
use verdict_core::traits::NlpAnalyzer;

use crate::analyzer::{AttachmentMode, RuleBasedAnalyzer};

/// Names accepted by `load_model`.
pub fn available_models() -> &'static [&'static str] {
    &[DEFAULT_NLP_MODEL, FALLBACK_NLP_MODEL]
}

/// Load a model by name.
pub fn load_model(name: &str) -> Result<Arc<dyn NlpAnalyzer>, NlpError> {
    let mode = match name {
        DEFAULT_NLP_MODEL => AttachmentMode::Heuristic,
        FALLBACK_NLP_MODEL => AttachmentMode::Flat,
        _ => {
            return Err(NlpError::ModelUnavailable {
                model: name.to_string(),
            })
        }
    };
    Ok(Arc::new(RuleBasedAnalyzer::new(name, mode)))
}

/// Load `primary`, falling back to `fallback`. Fails only if neither loads.
pub fn load_with_fallback(primary: &str, fallback: &str) -> Result<Arc<dyn NlpAnalyzer>, NlpError> {
    match load_model(primary) {
        Ok(model) => {
            info!(model = primary, "loaded NLP model");
            Ok(model)
        }
        Err(primary_err) => {
            warn!(
                model = primary,
                fallback,
                error = %primary_err,
                "primary NLP model unavailable, trying fallback"
            );
            load_model(fallback).map_err(|_| NlpError::NoModelLoaded {
                tried: format!("{primary}, {fallback}"),
            })
        }
    }
}

/// Load the default model pair.
pub fn load_default() -> Result<Arc<dyn NlpAnalyzer>, NlpError> {
    load_with_fallback(DEFAULT_NLP_MODEL, FALLBACK_NLP_MODEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_models() {
        for name in available_models() {
            assert_eq!(load_model(name).unwrap().model_name(), *name);
        }
    }

    #[test]
    fn unknown_model_is_unavailable() {
        let err = load_model("xx_missing").err().unwrap();
        assert!(matches!(err, NlpError::ModelUnavailable { .. }));
    }

    #[test]
    fn falls_back_when_primary_missing() {
        let model = load_with_fallback("xx_missing", FALLBACK_NLP_MODEL).unwrap();
        assert_eq!(model.model_name(), FALLBACK_NLP_MODEL);
    }

    #[test]
    fn fails_when_neither_loads() {
        let err = load_with_fallback("xx_one", "xx_two").err().unwrap();
        assert!(matches!(err, NlpError::NoModelLoaded { .. }));
        assert!(err.to_string().contains("xx_one"));
    }
}
