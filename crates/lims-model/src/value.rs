//! The polymorphic `value`/`value2` field type.

use serde::{Deserialize, Serialize};

/// Sentinel the LIMS expects for dummy rules: the two-character string `""`.
///
/// It must reach the wire as a JSON *string* containing two quote
/// characters, never as JSON null or an empty string.
pub const DUMMY_SENTINEL: &str = "\"\"";

/// A rule comparison value: null, a JSON number, or free text.
///
/// `value`, `value2`, and `DDF_target_value` all use this union. Integers
/// and floats are kept distinct so CSV-sourced payloads round-trip without
/// turning `30` into `30.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl RuleValue {
    /// The dummy-rule sentinel value.
    pub fn dummy() -> Self {
        RuleValue::Text(DUMMY_SENTINEL.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RuleValue::Null)
    }

    /// True if this is exactly the dummy sentinel string.
    pub fn is_dummy(&self) -> bool {
        matches!(self, RuleValue::Text(text) if text == DUMMY_SENTINEL)
    }

    /// Numeric view of the value, if it carries one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RuleValue::Int(n) => Some(*n as f64),
            RuleValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<f64> for RuleValue {
    fn from(x: f64) -> Self {
        RuleValue::Float(x)
    }
}

impl From<i64> for RuleValue {
    fn from(n: i64) -> Self {
        RuleValue::Int(n)
    }
}

impl From<String> for RuleValue {
    fn from(text: String) -> Self {
        RuleValue::Text(text)
    }
}

impl From<&str> for RuleValue {
    fn from(text: &str) -> Self {
        RuleValue::Text(text.to_string())
    }
}
