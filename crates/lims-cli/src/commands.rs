//! Subcommand implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use tracing::{info, warn};

use lims_engine::{
    Mode, NutritionInput, ParamSpec, build_nutrition_rules, build_rules, parse_number_with_unit,
};
use lims_ingest::{merge_tables, read_csv_table, rules_payload_from_rows, specs_payload_from_rows};
use lims_model::RulesPayload;
use lims_update::{UpdateOptions, ValueType, parse_typed_value, remove_params, update_key};

use lims_cli::files::{
    default_out_path, load_json, sanitize_label, save_json, timestamped_rules_path,
    unique_out_path,
};

use crate::cli::{
    ConvertArgs, GenerateArgs, NutritionArgs, RangesArgs, RemoveParamArgs, UpdateKeyArgs,
    UpdateSpecIdArgs, UpdateUnitArgs, ValueTypeArg,
};
use crate::summary::{GeneratedParam, print_generate_summary, print_ranges};

/// Parses a free-text target: literal "null" → none, locale-aware numerics
/// otherwise. Stripped unit text is surfaced as a warning.
fn parse_target_text(parametertype_id: i64, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let parsed = parse_number_with_unit(trimmed);
    if let Some(message) = parsed.error {
        bail!("Invalid target '{raw}' for parameter {parametertype_id}: {message}");
    }
    if parsed.had_unit_text {
        warn!(
            parametertype_id,
            unit = parsed.extracted_unit.as_deref().unwrap_or_default(),
            "unit text was removed from the target input"
        );
    }
    Ok(parsed.value)
}

fn parse_optional_unit(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_param_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid parametertype_id '{raw}'. Must be an integer."))
}

fn restrict_ids(ids: &[i64]) -> Option<BTreeSet<i64>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.iter().copied().collect())
    }
}

pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let qual = args
        .qual
        .as_ref()
        .map(|texts| (texts[0].as_str(), texts[1].as_str()));

    let mut specs = Vec::new();
    for chunk in args.params.chunks(4) {
        let [pid_raw, target_raw, unit_raw, mode_raw] = chunk else {
            bail!("--param expects PARAM_ID TARGET UNIT MODE");
        };
        let parametertype_id = parse_param_id(pid_raw)?;
        let target = parse_target_text(parametertype_id, target_raw)?;
        let mode = Mode::from_parts(mode_raw, target, qual)?;
        specs.push(ParamSpec {
            parametertype_id,
            unit: parse_optional_unit(unit_raw),
            mode,
        });
    }

    let mut all_rules = Vec::new();
    let mut summary = Vec::new();
    for spec in &specs {
        let rules = build_rules(spec, args.spec_id)?;
        summary.push(GeneratedParam {
            parametertype_id: spec.parametertype_id,
            mode: spec.mode.name(),
            rules: rules.len(),
        });
        all_rules.extend(rules);
    }

    let payload = RulesPayload { rules: all_rules };
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| timestamped_rules_path("Rules", args.spec_id));
    save_json(&payload, &out_path)?;
    print_generate_summary(&summary, payload.len(), &out_path);
    Ok(())
}

pub fn run_nutrition(args: &NutritionArgs) -> Result<()> {
    let mut inputs: BTreeMap<i64, NutritionInput> = BTreeMap::new();
    for chunk in args.params.chunks(3) {
        let [pid_raw, target_raw, unit_raw] = chunk else {
            bail!("--param expects PARAM_ID TARGET UNIT");
        };
        let parametertype_id = parse_param_id(pid_raw)?;
        let target = parse_target_text(parametertype_id, target_raw)?;
        inputs.insert(
            parametertype_id,
            NutritionInput {
                target,
                unit: parse_optional_unit(unit_raw),
                deviation_percent: None,
            },
        );
    }
    for chunk in args.devs.chunks(2) {
        let [pid_raw, percent_raw] = chunk else {
            bail!("--dev expects PARAM_ID PERCENT");
        };
        let parametertype_id = parse_param_id(pid_raw)?;
        let percent = percent_raw
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .with_context(|| format!("Invalid deviation% '{percent_raw}'."))?;
        inputs
            .entry(parametertype_id)
            .or_default()
            .deviation_percent = Some(percent);
    }

    let (rules, warnings) = build_nutrition_rules(args.spec_id, &inputs)?;
    for warning in &warnings {
        warn!("{warning}");
    }

    let payload = RulesPayload { rules };
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| timestamped_rules_path("Rules", args.spec_id));
    save_json(&payload, &out_path)?;
    println!("Generated {} rules.", payload.len());
    println!("Wrote: {}", out_path.display());
    Ok(())
}

pub fn run_ranges(args: &RangesArgs) -> Result<()> {
    if args.target < 0.0 {
        bail!("target must not be negative (got {}).", args.target);
    }
    print_ranges(args.mode, args.target);
    Ok(())
}

/// Which payload kind a CSV conversion produces.
#[derive(Clone, Copy)]
pub enum ConvertKind {
    Rules,
    Specs,
}

fn delimiter_byte(raw: &str) -> Result<u8> {
    let normalized = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match normalized.as_bytes() {
        [byte] => Ok(*byte),
        _ => bail!("CSV delimiter must be a single character (got '{raw}')."),
    }
}

pub fn run_convert(args: &ConvertArgs, kind: ConvertKind) -> Result<()> {
    let delimiter = delimiter_byte(&args.delim)?;

    let mut tables = Vec::new();
    for path in &args.from {
        info!(path = %path.display(), "reading CSV");
        tables.push(read_csv_table(path, delimiter)?);
    }
    let rows = merge_tables(&tables)?;

    let out_path = unique_out_path(&args.to);
    let entries = match kind {
        ConvertKind::Rules => {
            let payload = rules_payload_from_rows(&rows)?;
            save_json(&payload, &out_path)?;
            payload.rules.len()
        }
        ConvertKind::Specs => {
            let payload = specs_payload_from_rows(&rows)?;
            save_json(&payload, &out_path)?;
            payload.specs.len()
        }
    };

    println!(
        "Successfully converted {} file(s): {} entries after merge/dedupe",
        args.from.len(),
        entries
    );
    println!("Wrote: {}", out_path.display());
    Ok(())
}

pub fn run_update_key(args: &UpdateKeyArgs) -> Result<()> {
    let as_type = match args.as_type {
        ValueTypeArg::Auto => ValueType::Auto,
        ValueTypeArg::Str => ValueType::Str,
        ValueTypeArg::Int => ValueType::Int,
        ValueTypeArg::Float => ValueType::Float,
        ValueTypeArg::Bool => ValueType::Bool,
        ValueTypeArg::Null => ValueType::Null,
        ValueTypeArg::Json => ValueType::Json,
    };
    let new_value = parse_typed_value(&args.value, as_type)?;

    let mut doc = load_json(&args.input)?;
    let options = UpdateOptions {
        only_missing: args.only_missing,
        restrict_param_ids: restrict_ids(&args.parametertype_ids),
    };
    let (updated, total) = update_key(&mut doc, &args.key, &new_value, &options)?;

    let out_path = resolve_out_path(
        &args.input,
        args.out.as_ref(),
        args.inplace,
        &format!(
            "{}_{}",
            args.key.replace('.', "_"),
            sanitize_label(&args.value)
        ),
    );
    save_json(&doc, &out_path)?;

    println!("Total rules: {total}");
    println!("Updated '{}' in: {updated} rules", args.key);
    println!("Wrote: {}", out_path.display());
    Ok(())
}

fn resolve_out_path(input: &Path, out: Option<&PathBuf>, inplace: bool, label: &str) -> PathBuf {
    if inplace {
        input.to_path_buf()
    } else if let Some(out) = out {
        out.clone()
    } else {
        default_out_path(input, label)
    }
}

pub fn run_update_spec_id(args: &UpdateSpecIdArgs) -> Result<()> {
    let new_value = json!(args.spec_id);
    let multiple_inputs = args.inputs.len() > 1;
    let merge_to_single_output = multiple_inputs && args.out.is_some() && !args.inplace;

    let mut total_files = 0usize;
    let mut grand_total_rules = 0usize;
    let mut grand_total_updated = 0usize;

    if merge_to_single_output {
        let mut combined = Vec::new();
        for input in &args.inputs {
            let mut doc = load_json(input)?;
            let (updated, total) =
                update_key(&mut doc, "data.spec_id", &new_value, &UpdateOptions::default())?;
            let Some(Value::Array(items)) = doc.get_mut("rules").map(Value::take) else {
                bail!("Input JSON '{}' has no 'rules' list.", input.display());
            };
            combined.extend(items);

            total_files += 1;
            grand_total_rules += total;
            grand_total_updated += updated;
            println!("[{}]", input.display());
            println!("  Total rules: {total}");
            println!("  Updated spec_id in: {updated} rules");
        }

        let out_path = args.out.clone().expect("merge mode requires --out");
        save_json(&json!({ "rules": combined }), &out_path)?;
        println!();
        println!("Merged output written to: {}", out_path.display());
    } else {
        for input in &args.inputs {
            let out_path = if args.inplace {
                input.clone()
            } else if let (Some(out), false) = (&args.out, multiple_inputs) {
                out.clone()
            } else {
                default_out_path(input, &format!("spec{}", args.spec_id))
            };

            let mut doc = load_json(input)?;
            let (updated, total) =
                update_key(&mut doc, "data.spec_id", &new_value, &UpdateOptions::default())?;
            save_json(&doc, &out_path)?;

            total_files += 1;
            grand_total_rules += total;
            grand_total_updated += updated;
            println!("[{}] -> [{}]", input.display(), out_path.display());
            println!("  Total rules: {total}");
            println!("  Updated spec_id in: {updated} rules");
        }
        println!();
    }

    println!("Summary:");
    println!("  Files processed: {total_files}");
    println!("  Total rules across all files: {grand_total_rules}");
    println!("  Total rules updated: {grand_total_updated}");
    Ok(())
}

pub fn run_update_unit(args: &UpdateUnitArgs) -> Result<()> {
    let (new_value, label) = if args.clear {
        (Value::Null, "unit_null".to_string())
    } else {
        let unit = args
            .unit
            .as_deref()
            .context("either --unit or --clear is required")?;
        (
            Value::String(unit.to_string()),
            format!("unit_{}", sanitize_label(unit)),
        )
    };

    let mut doc = load_json(&args.input)?;
    let options = UpdateOptions {
        only_missing: args.only_missing,
        restrict_param_ids: restrict_ids(&args.parametertype_ids),
    };
    let (updated, total) = update_key(&mut doc, "data.DDF_unit", &new_value, &options)?;

    let out_path = resolve_out_path(&args.input, args.out.as_ref(), args.inplace, &label);
    save_json(&doc, &out_path)?;

    println!("Total rules: {total}");
    println!("Updated DDF_unit in: {updated} rules");
    println!("Wrote: {}", out_path.display());
    Ok(())
}

pub fn run_remove_param(args: &RemoveParamArgs) -> Result<()> {
    let out_path = if args.inplace {
        args.input.clone()
    } else {
        args.out
            .clone()
            .context("You must specify --out unless using --inplace.")?
    };

    let mut doc = load_json(&args.input)?;
    let ids: BTreeSet<i64> = args.param_ids.iter().copied().collect();
    let (removed, _total) = remove_params(&mut doc, &ids)?;
    save_json(&doc, &out_path)?;

    let removed_list = args
        .param_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Removed {removed} rule(s) with parametertype_id in [{removed_list}]");
    println!("Output written to {}", out_path.display());
    Ok(())
}
