//! Bulk mutation operations over a rules wire document.
//!
//! These operate on the raw JSON tree rather than the typed model so that
//! foreign fields and unknown actions pass through untouched.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::{Result, UpdateError};
use crate::path::{get_path, set_path, split_path};

/// Filters applied by [`update_key`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Only set where the key is currently missing, null, `""`, or the
    /// literal string `"null"` (case-insensitive).
    pub only_missing: bool,
    /// Only touch rules whose `data.parametertype_id` is in this set.
    pub restrict_param_ids: Option<BTreeSet<i64>>,
}

fn rules_array_mut(doc: &mut Value) -> Result<&mut Vec<Value>> {
    doc.get_mut("rules")
        .and_then(Value::as_array_mut)
        .ok_or(UpdateError::MissingRulesList)
}

/// Numeric `data.parametertype_id` of one rule item, tolerating string ids.
fn param_id_of(item: &Value) -> Option<i64> {
    let pid = item.get("data")?.get("parametertype_id")?;
    match pid {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|x| x.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn param_id_matches(item: &Value, restrict: Option<&BTreeSet<i64>>) -> bool {
    match restrict {
        None => true,
        Some(ids) => param_id_of(item).is_some_and(|pid| ids.contains(&pid)),
    }
}

/// Missing means: absent, null, empty string, or the literal "null".
fn is_missing(current: Option<&Value>) -> bool {
    match current {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            let t = s.trim();
            t.is_empty() || t.eq_ignore_ascii_case("null")
        }
        Some(_) => false,
    }
}

/// Overwrites a dot-path key in every rule item that passes the filters.
///
/// Intermediate objects are created as needed, so setting a key that was
/// never present still counts as an update. Non-object items are skipped.
///
/// Returns `(updated_count, total_rules)`.
pub fn update_key(
    doc: &mut Value,
    key_path: &str,
    new_value: &Value,
    options: &UpdateOptions,
) -> Result<(usize, usize)> {
    let path = split_path(key_path)?;
    let rules = rules_array_mut(doc)?;
    let total = rules.len();
    let mut updated = 0;

    for item in rules.iter_mut() {
        if !item.is_object() {
            continue;
        }
        if !param_id_matches(item, options.restrict_param_ids.as_ref()) {
            continue;
        }
        if options.only_missing && !is_missing(get_path(item, &path)) {
            continue;
        }
        set_path(item, &path, new_value.clone());
        updated += 1;
    }

    Ok((updated, total))
}

/// Drops every rule whose numeric `data.parametertype_id` is in `ids`.
///
/// Items with a missing or non-numeric id are always kept.
///
/// Returns `(removed_count, original_total)`.
pub fn remove_params(doc: &mut Value, ids: &BTreeSet<i64>) -> Result<(usize, usize)> {
    let rules = rules_array_mut(doc)?;
    let original_total = rules.len();
    rules.retain(|item| {
        // String ids never match a numeric removal set.
        let numeric_id = item
            .get("data")
            .and_then(|d| d.get("parametertype_id"))
            .and_then(Value::as_i64);
        numeric_id.is_none_or(|pid| !ids.contains(&pid))
    });
    let removed = original_total - rules.len();
    Ok((removed, original_total))
}

/// Validates that a document has a top-level `rules` list and returns its
/// length.
pub fn rule_count(doc: &Value) -> Result<usize> {
    doc.get("rules")
        .and_then(Value::as_array)
        .map(Vec::len)
        .ok_or(UpdateError::MissingRulesList)
}
