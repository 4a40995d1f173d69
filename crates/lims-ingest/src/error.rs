#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("CSV '{path}' has no header row.")]
    NoHeader { path: PathBuf },

    #[error(
        "Incompatible columns between CSV files.\nReference ({reference}): {reference_headers:?}\nCurrent   ({current}): {current_headers:?}"
    )]
    IncompatibleColumns {
        reference: PathBuf,
        reference_headers: Vec<String>,
        current: PathBuf,
        current_headers: Vec<String>,
    },

    #[error("row {row}: invalid {field} '{value}': {message}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
