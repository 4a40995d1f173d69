//! Row-map → wire payload converters.

use std::collections::BTreeMap;
use std::str::FromStr;

use lims_model::{Entry, Rule, RuleValue, RulesPayload, SpecRecord, SpecsPayload};

use crate::coerce::{null_if_blank_or_literal_null, to_int, to_number_or_keep, to_str};
use crate::csv_table::get_field;
use crate::error::{IngestError, Result};

/// Parses a closed-enum cell: blank/"null" → `None`, unknown text → error.
fn parse_enum_field<T>(row: usize, field: &'static str, raw: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    match null_if_blank_or_literal_null(raw) {
        None => Ok(None),
        Some(cleaned) => cleaned
            .parse::<T>()
            .map(Some)
            .map_err(|message| IngestError::InvalidField {
                row,
                field,
                value: cleaned,
                message,
            }),
    }
}

fn string_or_null(raw: &str) -> RuleValue {
    match null_if_blank_or_literal_null(raw) {
        Some(text) => RuleValue::Text(text),
        None => RuleValue::Null,
    }
}

/// Converts merged rules CSV rows into the rules wire payload.
///
/// Row numbers in errors are 1-based data rows (header excluded).
pub fn rules_payload_from_rows(rows: &[BTreeMap<String, String>]) -> Result<RulesPayload> {
    let mut payload = RulesPayload::default();
    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        let rule = Rule {
            color: parse_enum_field(row_number, "color", &get_field(row, "color"))?,
            column: to_int(&get_field(row, "column")),
            ddf_target_value: string_or_null(&get_field(row, "DDF_target_value")),
            ddf_type: parse_enum_field(row_number, "DDF_type", &get_field(row, "DDF_type"))?,
            ddf_unit: null_if_blank_or_literal_null(&get_field(row, "DDF_unit")),
            inverse: to_int(&get_field(row, "inverse")),
            linker: parse_enum_field(row_number, "linker", &get_field(row, "linker"))?,
            operator: parse_enum_field(row_number, "operator", &get_field(row, "operator"))?,
            operator2: parse_enum_field(row_number, "operator2", &get_field(row, "operator2"))?,
            parametertype_id: to_int(&get_field(row, "parametertype_id")),
            regex_filter: null_if_blank_or_literal_null(&get_field(row, "regex_filter")),
            show: to_int(&get_field(row, "show")),
            spec_id: to_int(&get_field(row, "spec_id")),
            text: null_if_blank_or_literal_null(&get_field(row, "text")),
            translations: null_if_blank_or_literal_null(&get_field(row, "translations")),
            value: to_number_or_keep(&get_field(row, "value")),
            value2: to_number_or_keep(&get_field(row, "value2")),
        };
        payload.rules.push(Entry::create(rule));
    }
    Ok(payload)
}

/// Converts merged specs CSV rows into the specs wire payload.
///
/// `translations` is always rebuilt from the spec name as the
/// double-encoded JSON string the LIMS import expects.
pub fn specs_payload_from_rows(rows: &[BTreeMap<String, String>]) -> Result<SpecsPayload> {
    let mut payload = SpecsPayload::default();
    for row in rows {
        let name = to_str(&get_field(row, "name"));
        let record = SpecRecord {
            spec_type: to_int(&get_field(row, "type")),
            status: to_int(&get_field(row, "status")),
            archiviert: to_int(&get_field(row, "archiviert")),
            order: null_if_blank_or_literal_null(&get_field(row, "order")),
            translations: Some(SpecRecord::default_translations(&name)),
            name,
        };
        payload.specs.push(Entry::create(record));
    }
    Ok(payload)
}
