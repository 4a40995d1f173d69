//! CSV table reading and multi-file merging.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::warn;

use crate::error::{IngestError, Result};

/// One parsed CSV file: header order plus cleaned row maps.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

/// Reads a CSV file into cleaned row maps.
///
/// Strips a UTF-8 BOM from the first header, trims every cell, and skips
/// rows that are fully blank after trimming.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|error| csv_error(path, &error))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| csv_error(path, &error))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();
    if headers.is_empty() {
        return Err(IngestError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| csv_error(path, &error))?;
        let mut row = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").trim().to_string();
            row.insert(header.clone(), value);
        }
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(CsvTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn normalized_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_lowercase()).collect()
}

/// Merges tables of the same kind into one row list.
///
/// All tables must share the same normalized header *set*; a differing set
/// aborts the merge, a differing order only warns. Rows are deduplicated on
/// their full cleaned content, first occurrence wins.
pub fn merge_tables(tables: &[CsvTable]) -> Result<Vec<BTreeMap<String, String>>> {
    let Some(reference) = tables.first() else {
        return Ok(Vec::new());
    };
    let reference_normalized = normalized_headers(&reference.headers);
    let reference_set: BTreeSet<&String> = reference_normalized.iter().collect();

    let mut merged = Vec::new();
    let mut seen: BTreeSet<BTreeMap<String, String>> = BTreeSet::new();

    for table in tables {
        let normalized = normalized_headers(&table.headers);
        let current_set: BTreeSet<&String> = normalized.iter().collect();
        if current_set != reference_set {
            return Err(IngestError::IncompatibleColumns {
                reference: reference.path.clone(),
                reference_headers: reference.headers.clone(),
                current: table.path.clone(),
                current_headers: table.headers.clone(),
            });
        }
        if normalized != reference_normalized {
            warn!(
                reference = %reference.path.display(),
                current = %table.path.display(),
                "column order differs between CSV files, continuing"
            );
        }

        for row in &table.rows {
            if seen.insert(row.clone()) {
                merged.push(row.clone());
            }
        }
    }

    Ok(merged)
}

/// Field accessor with the original tools' "missing is blank" behavior.
pub fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(path: &str, headers: &[&str], rows: &[&[&str]]) -> CsvTable {
        CsvTable {
            path: PathBuf::from(path),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|values| {
                    headers
                        .iter()
                        .zip(values.iter())
                        .map(|(h, v)| ((*h).to_string(), (*v).to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn test_merge_dedupes_first_wins() {
        let a = table("a.csv", &["name", "value"], &[&["x", "1"], &["y", "2"]]);
        let b = table("b.csv", &["name", "value"], &[&["x", "1"], &["z", "3"]]);
        let merged = merge_tables(&[a, b]).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(get_field(&merged[0], "name"), "x");
        assert_eq!(get_field(&merged[2], "name"), "z");
    }

    #[test]
    fn test_merge_rejects_differing_column_sets() {
        let a = table("a.csv", &["name", "value"], &[]);
        let b = table("b.csv", &["name", "other"], &[]);
        assert!(matches!(
            merge_tables(&[a, b]),
            Err(IngestError::IncompatibleColumns { .. })
        ));
    }

    #[test]
    fn test_merge_accepts_case_and_order_differences() {
        let a = table("a.csv", &["Name", "Value"], &[&["x", "1"]]);
        let b = table("b.csv", &["value", "name"], &[]);
        assert!(merge_tables(&[a, b]).is_ok());
    }
}
