//! Dot-path get/set over a generic JSON tree.

use serde_json::{Map, Value};

use crate::error::{Result, UpdateError};

/// Splits a dot-path into its segments, rejecting empty paths.
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').filter(|p| !p.trim().is_empty()).collect();
    if segments.is_empty() {
        return Err(UpdateError::EmptyKeyPath);
    }
    Ok(segments)
}

/// Reads the value at a dot-path; `None` when any segment is missing or a
/// non-object is traversed.
pub fn get_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Writes a value at a dot-path, creating intermediate objects as needed.
///
/// An intermediate segment that exists but is not an object is replaced by
/// an empty object — missing structure is never an error on set.
pub fn set_path(root: &mut Value, path: &[&str], value: Value) {
    debug_assert!(!path.is_empty());
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut current = root;
    for key in &path[..path.len() - 1] {
        let map = current.as_object_mut().expect("object ensured above");
        let entry = map
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }
    let map = current.as_object_mut().expect("object ensured above");
    map.insert(path[path.len() - 1].to_string(), value);
}
