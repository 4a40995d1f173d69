//! File I/O and output filename conventions shared by the subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;

/// Loads and parses a JSON document; both failures are fatal.
pub fn load_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse JSON: {}", path.display()))
}

/// Writes a payload in wire format, creating parent directories as needed.
pub fn save_json<T: Serialize>(payload: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let text = lims_model::to_wire_json(payload)?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

/// Filename-safe version of a value label (drops slashes and spaces).
pub fn sanitize_label(value: &str) -> String {
    value.replace(['/', ' '], "")
}

/// Derived output path: `Rules_20251105.json` + `spec789` →
/// `Rules_20251105_spec789.json`.
pub fn default_out_path(in_path: &Path, label: &str) -> PathBuf {
    let stem = in_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    in_path.with_file_name(format!("{stem}_{label}.json"))
}

/// First non-existing variant of a requested path: `merged.json`,
/// `merged_1.json`, `merged_2.json`, ...
pub fn unique_out_path(requested: &Path) -> PathBuf {
    if !requested.exists() {
        return requested.to_path_buf();
    }
    let stem = requested
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = requested
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut index = 1;
    loop {
        let candidate = requested.with_file_name(format!("{stem}_{index}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Timestamped default output name for generated rule sets.
pub fn timestamped_rules_path(prefix: &str, spec_id: i64) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M");
    PathBuf::from(format!("{prefix}_{spec_id}_{stamp}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_out_path() {
        let path = default_out_path(Path::new("out/Rules_20251105.json"), "spec789");
        assert_eq!(path, Path::new("out/Rules_20251105_spec789.json"));
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("mg/kg"), "mgkg");
        assert_eq!(sanitize_label("not OK"), "notOK");
    }

    #[test]
    fn test_unique_out_path_suffixes() {
        let dir = std::env::temp_dir().join(format!("lims-cli-tests-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let requested = dir.join("merged_specs.json");

        assert_eq!(unique_out_path(&requested), requested);

        fs::write(&requested, "{}").unwrap();
        let first = unique_out_path(&requested);
        assert_eq!(first, dir.join("merged_specs_1.json"));

        fs::write(&first, "{}").unwrap();
        assert_eq!(unique_out_path(&requested), dir.join("merged_specs_2.json"));

        fs::remove_file(&requested).unwrap();
        fs::remove_file(&first).unwrap();
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = std::env::temp_dir().join(format!("lims-cli-tests-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.json");

        let payload = serde_json::json!({"rules": [{"action": "create"}]});
        save_json(&payload, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));

        let loaded: Value = load_json(&path).unwrap();
        assert_eq!(loaded, payload);
        fs::remove_file(&path).unwrap();
    }
}
