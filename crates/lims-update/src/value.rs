//! Typed parsing of CLI-supplied replacement values.

use serde_json::{Number, Value};

use crate::error::{Result, UpdateError};

/// How a raw replacement string should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    /// Detect: null → bool → int → float → string.
    #[default]
    Auto,
    Str,
    Int,
    Float,
    Bool,
    Null,
    /// A JSON literal (object/array/number/bool/null/string).
    Json,
}

fn looks_like_int(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn float_value(x: f64) -> Option<Value> {
    Number::from_f64(x).map(Value::Number)
}

/// Parses a raw CLI value according to the requested type.
pub fn parse_typed_value(raw: &str, as_type: ValueType) -> Result<Value> {
    let trimmed = raw.trim();
    match as_type {
        ValueType::Str => Ok(Value::String(raw.to_string())),
        ValueType::Int => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| UpdateError::InvalidTypedValue {
                as_type: "int",
                raw: raw.to_string(),
            }),
        ValueType::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .and_then(float_value)
            .ok_or_else(|| UpdateError::InvalidTypedValue {
                as_type: "float",
                raw: raw.to_string(),
            }),
        ValueType::Bool => match trimmed.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "n" | "off" => Ok(Value::Bool(false)),
            _ => Err(UpdateError::InvalidTypedValue {
                as_type: "boolean",
                raw: raw.to_string(),
            }),
        },
        ValueType::Null => Ok(Value::Null),
        ValueType::Json => Ok(serde_json::from_str(trimmed)?),
        ValueType::Auto => Ok(auto_detect(raw)),
    }
}

/// Auto-detection, in the fixed order the original tool used:
/// blank/"null" → null, boolean literal, integer-looking, float, string.
fn auto_detect(raw: &str) -> Value {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    if lower.is_empty() || lower == "null" {
        return Value::Null;
    }
    if lower == "true" || lower == "false" {
        return Value::Bool(lower == "true");
    }
    if looks_like_int(trimmed)
        && let Ok(n) = trimmed.parse::<i64>()
    {
        return Value::from(n);
    }
    if let Ok(x) = trimmed.parse::<f64>()
        && x.is_finite()
        && let Some(value) = float_value(x)
    {
        return value;
    }
    Value::String(raw.to_string())
}
