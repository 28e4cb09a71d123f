//! Typed readers for runtime config overrides.
//!
//! A value of the wrong type or out of range is ignored with a warning.

use serde_json::Value;
use tracing::warn;

/// A float in `[0, 1]`.
pub fn unit_f64(key: &str, value: &Value) -> Option<f64> {
    match value.as_f64() {
        Some(v) if (0.0..=1.0).contains(&v) => Some(v),
        _ => {
            warn!(key, %value, "ignoring config override: expected a number in [0, 1]");
            None
        }
    }
}

/// An integer greater than zero.
pub fn positive_usize(key: &str, value: &Value) -> Option<usize> {
    match value.as_u64() {
        Some(v) if v > 0 => Some(v as usize),
        _ => {
            warn!(key, %value, "ignoring config override: expected a positive integer");
            None
        }
    }
}

pub fn boolean(key: &str, value: &Value) -> Option<bool> {
    match value.as_bool() {
        Some(v) => Some(v),
        None => {
            warn!(key, %value, "ignoring config override: expected a boolean");
            None
        }
    }
}

pub fn string(key: &str, value: &Value) -> Option<String> {
    match value.as_str() {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            warn!(key, %value, "ignoring config override: expected a non-empty string");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_out_of_range_and_wrong_types() {
        assert_eq!(unit_f64("k", &json!(0.4)), Some(0.4));
        assert_eq!(unit_f64("k", &json!(1.5)), None);
        assert_eq!(unit_f64("k", &json!("0.4")), None);
        assert_eq!(positive_usize("k", &json!(0)), None);
        assert_eq!(positive_usize("k", &json!(-3)), None);
        assert_eq!(positive_usize("k", &json!(10)), Some(10));
        assert_eq!(boolean("k", &json!(1)), None);
        assert_eq!(string("k", &json!("")), None);
    }
}
