use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ConfidenceBreakdown;

/// Input to one validation call. Immutable for the duration of the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Full source text being checked.
    pub text: String,
    /// Character offset of the flagged span within `text`.
    pub error_position: usize,
    /// The exact flagged substring.
    pub error_text: String,
    pub rule_type: Option<String>,
    pub rule_name: Option<String>,
    pub rule_severity: Option<String>,
    pub content_type: Option<String>,
    pub domain: Option<String>,
    pub confidence_breakdown: Option<ConfidenceBreakdown>,
    /// Free-form extension point. Cross-rule validation reads `all_rules`
    /// and `all_errors` from here.
    #[serde(default)]
    pub additional_context: Map<String, Value>,
}

impl ValidationContext {
    pub fn new(text: impl Into<String>, error_position: usize, error_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error_position,
            error_text: error_text.into(),
            ..Default::default()
        }
    }

    pub fn with_rule(mut self, rule_type: impl Into<String>, rule_name: impl Into<String>) -> Self {
        self.rule_type = Some(rule_type.into());
        self.rule_name = Some(rule_name.into());
        self
    }

    pub fn with_rule_type(mut self, rule_type: impl Into<String>) -> Self {
        self.rule_type = Some(rule_type.into());
        self
    }

    pub fn with_rule_name(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = Some(rule_name.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.rule_severity = Some(severity.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_confidence_breakdown(mut self, breakdown: ConfidenceBreakdown) -> Self {
        self.confidence_breakdown = Some(breakdown);
        self
    }

    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_context.insert(key.into(), value.into());
        self
    }

    /// Rule type, or `""` when absent.
    pub fn rule_type_str(&self) -> &str {
        self.rule_type.as_deref().unwrap_or("")
    }

    /// Rule name, or `""` when absent.
    pub fn rule_name_str(&self) -> &str {
        self.rule_name.as_deref().unwrap_or("")
    }

    /// Character length of `text`.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Rule names applied in the same pass, current rule first.
    ///
    /// Accepts a list of strings or of objects carrying `rule_name`/`name`.
    /// Anything else under `all_rules` is ignored. Duplicates are dropped.
    pub fn all_rules(&self) -> Vec<String> {
        let mut rules = Vec::new();
        if let Some(name) = self.rule_name.as_deref().filter(|n| !n.is_empty()) {
            rules.push(name.to_string());
        }
        if let Some(Value::Array(items)) = self.additional_context.get("all_rules") {
            for item in items {
                let name = match item {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(obj) => obj
                        .get("rule_name")
                        .or_else(|| obj.get("name"))
                        .and_then(Value::as_str),
                    _ => None,
                };
                if let Some(name) = name.filter(|n| !n.is_empty()) {
                    if !rules.iter().any(|r| r == name) {
                        rules.push(name.to_string());
                    }
                }
            }
        }
        rules
    }

    /// Sibling error records from the same pass, current error first.
    pub fn all_errors(&self) -> Vec<ErrorRecord> {
        let current = ErrorRecord::from_context(self);
        let mut errors = vec![current.clone()];
        if let Some(Value::Array(items)) = self.additional_context.get("all_errors") {
            for record in items.iter().filter_map(ErrorRecord::from_value) {
                if record.position == current.position && record.rule_name == current.rule_name {
                    continue;
                }
                errors.push(record);
            }
        }
        errors
    }
}

/// Typed view of one element of `additional_context["all_errors"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub rule_type: String,
    pub rule_name: String,
    pub position: usize,
    pub severity: String,
    pub message: String,
    pub error_text: String,
}

impl ErrorRecord {
    pub fn from_context(ctx: &ValidationContext) -> Self {
        Self {
            rule_type: ctx.rule_type_str().to_string(),
            rule_name: ctx.rule_name_str().to_string(),
            position: ctx.error_position,
            severity: ctx
                .rule_severity
                .clone()
                .unwrap_or_else(|| "medium".to_string()),
            message: String::new(),
            error_text: ctx.error_text.clone(),
        }
    }

    /// Lenient parse. Returns `None` for anything that is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text_field = |keys: &[&str]| -> String {
            keys.iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_str))
                .unwrap_or_default()
                .to_string()
        };
        let position = ["position", "error_position", "start"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_u64))
            .unwrap_or(0) as usize;
        let severity = text_field(&["severity", "rule_severity"]);
        Some(Self {
            rule_type: text_field(&["rule_type", "type"]),
            rule_name: text_field(&["rule_name", "rule_id", "name"]),
            position,
            severity: if severity.is_empty() {
                "medium".to_string()
            } else {
                severity
            },
            message: text_field(&["message"]),
            error_text: text_field(&["error_text", "text", "flagged_text"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_rules_puts_current_rule_first_without_duplicates() {
        let ctx = ValidationContext::new("text", 0, "t")
            .with_rule("content", "content_reduction")
            .with_additional("all_rules", json!(["content_reduction", "information_completeness"]));
        assert_eq!(
            ctx.all_rules(),
            vec!["content_reduction".to_string(), "information_completeness".to_string()]
        );
    }

    #[test]
    fn malformed_all_rules_is_ignored() {
        let ctx = ValidationContext::new("text", 0, "t")
            .with_rule("style", "wordiness")
            .with_additional("all_rules", json!("not a list"));
        assert_eq!(ctx.all_rules(), vec!["wordiness".to_string()]);
    }

    #[test]
    fn all_errors_parses_objects_and_skips_garbage() {
        let ctx = ValidationContext::new("text", 3, "t")
            .with_rule("grammar", "agreement")
            .with_additional(
                "all_errors",
                json!([
                    {"type": "style", "rule_id": "passive_voice", "position": 10, "severity": "high"},
                    42,
                    "nope",
                    {"rule_type": "grammar", "rule_name": "agreement", "position": 3}
                ]),
            );
        let errors = ctx.all_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].rule_name, "agreement");
        assert_eq!(errors[1].rule_name, "passive_voice");
        assert_eq!(errors[1].severity, "high");
    }
}
