//! CSV ingestion and coercion into LIMS wire payloads.
//!
//! Reads flat key-value CSV exports, merges multiple files of one kind
//! (after validating they share a column set), and coerces cells into the
//! typed wire model with the exact historical null/number/string rules.

pub mod coerce;
pub mod convert;
pub mod csv_table;
pub mod error;

pub use coerce::{null_if_blank_or_literal_null, to_int, to_number_or_keep, to_str};
pub use convert::{rules_payload_from_rows, specs_payload_from_rows};
pub use csv_table::{CsvTable, get_field, merge_tables, read_csv_table};
pub use error::{IngestError, Result};
