//! Cell-level coercion rules for CSV → wire payload conversion.
//!
//! These reproduce the downstream system's historical import behavior
//! exactly; in particular `to_int` accepts `"3.0"` and truncates, and
//! `to_number_or_keep` passes textual values like `"OK"` through unchanged.

use lims_model::RuleValue;

/// Blank or case-insensitive literal `"null"` → `None`, else the trimmed
/// string.
pub fn null_if_blank_or_literal_null(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Integer coercion: blank/"null"/unparseable → `None`; float text like
/// `"3.0"` truncates to 3.
pub fn to_int(value: &str) -> Option<i64> {
    let cleaned = null_if_blank_or_literal_null(value)?;
    let parsed = cleaned.parse::<f64>().ok()?;
    if parsed.is_finite() {
        Some(parsed.trunc() as i64)
    } else {
        None
    }
}

fn looks_like_plain_int(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Polymorphic coercion for `value`/`value2`: blank/"null" → null,
/// integer-looking → int, float-parseable → float, else the trimmed string.
pub fn to_number_or_keep(value: &str) -> RuleValue {
    let Some(cleaned) = null_if_blank_or_literal_null(value) else {
        return RuleValue::Null;
    };
    if looks_like_plain_int(&cleaned)
        && let Ok(n) = cleaned.parse::<i64>()
    {
        return RuleValue::Int(n);
    }
    match cleaned.parse::<f64>() {
        Ok(x) if x.is_finite() => RuleValue::Float(x),
        _ => RuleValue::Text(cleaned),
    }
}

/// String passthrough for blank-tolerant fields: trimmed, possibly empty.
pub fn to_str(value: &str) -> String {
    value.trim().to_string()
}
