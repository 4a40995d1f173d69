//! Wire data model for LIMS rating-rule payloads.
//!
//! The downstream LIMS imports rule sets as an "action/data" JSON document.
//! This crate owns the exact shape of that document: the `Rule` record with
//! its fixed field order, the closed operator/classification enums, the
//! polymorphic value union with its dummy-string sentinel, and the specs
//! document with its double-encoded `translations` field.

pub mod enums;
pub mod error;
pub mod payload;
pub mod rule;
pub mod value;

pub use enums::{DdfType, Linker, Operator, RuleColor};
pub use error::{ModelError, Result};
pub use payload::{Entry, RulesPayload, SpecRecord, SpecsPayload, from_wire_json, to_wire_json};
pub use rule::Rule;
pub use value::{DUMMY_SENTINEL, RuleValue};
