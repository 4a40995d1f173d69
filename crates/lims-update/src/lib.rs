//! Mutation operations for existing LIMS rule documents.
//!
//! Works on the raw `serde_json::Value` tree so foreign fields, unknown
//! actions, and malformed items pass through untouched. Every operation is
//! total over a well-formed document and reports counts instead of partial
//! failures.

pub mod error;
pub mod ops;
pub mod path;
pub mod value;

pub use error::{Result, UpdateError};
pub use ops::{UpdateOptions, remove_params, rule_count, update_key};
pub use path::{get_path, set_path, split_path};
pub use value::{ValueType, parse_typed_value};
