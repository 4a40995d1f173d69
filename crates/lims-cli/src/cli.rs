//! CLI argument definitions for the LIMS rules toolkit.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lims-rules",
    version,
    about = "Generate and maintain LIMS rating-rule JSON payloads",
    long_about = "Generate acceptance-band rating rules for laboratory parameters,\n\
                  convert Specs/Rules CSV exports into LIMS import JSON, and apply\n\
                  bulk updates (spec_id, units, arbitrary keys) to existing payloads."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate rating rules for standalone parameters.
    Generate(GenerateArgs),

    /// Generate deviation-band rules for the nutrition parameter table.
    Nutrition(NutritionArgs),

    /// Print the band boundaries for a target without generating JSON.
    Ranges(RangesArgs),

    /// Convert Rules CSV export(s) into a merged Rules JSON payload.
    ConvertRules(ConvertArgs),

    /// Convert Specs CSV export(s) into a merged Specs JSON payload.
    ConvertSpecs(ConvertArgs),

    /// Update any key (dot-path) in every rule of a Rules JSON payload.
    UpdateKey(UpdateKeyArgs),

    /// Update spec_id for every rule in one or more Rules JSON payloads.
    UpdateSpecId(UpdateSpecIdArgs),

    /// Set or clear DDF_unit across a Rules JSON payload.
    UpdateUnit(UpdateUnitArgs),

    /// Remove all rules matching the given parametertype_id values.
    RemoveParam(RemoveParamArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// spec_id applied to every generated rule.
    #[arg(long = "spec-id")]
    pub spec_id: i64,

    /// Parameter row; repeatable. TARGET and UNIT accept the literal "null".
    #[arg(
        long = "param",
        num_args = 4,
        value_names = ["PARAM_ID", "TARGET", "UNIT", "MODE"],
        action = ArgAction::Append,
        required = true
    )]
    pub params: Vec<String>,

    /// Qualitative match texts, required when any row uses qualitative mode.
    #[arg(long = "qual", num_args = 2, value_names = ["EN", "DE"])]
    pub qual: Option<Vec<String>>,

    /// Output JSON path (default: Rules_<SPEC_ID>_<timestamp>.json).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct NutritionArgs {
    /// spec_id applied to every generated rule.
    #[arg(long = "spec-id")]
    pub spec_id: i64,

    /// Parameter row; repeatable. TARGET and UNIT accept the literal "null".
    /// Table parameters without a row get a dummy-sentinel rule.
    #[arg(
        long = "param",
        num_args = 3,
        value_names = ["PARAM_ID", "TARGET", "UNIT"],
        action = ArgAction::Append,
        required = true
    )]
    pub params: Vec<String>,

    /// Deviation percentage for a percent-policy parameter; repeatable.
    #[arg(
        long = "dev",
        num_args = 2,
        value_names = ["PARAM_ID", "PERCENT"],
        action = ArgAction::Append
    )]
    pub devs: Vec<String>,

    /// Output JSON path (default: Rules_<SPEC_ID>_<timestamp>.json).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RangesArgs {
    /// Numeric target value.
    #[arg(long = "target")]
    pub target: f64,

    /// Range rule style.
    #[arg(long = "mode", value_enum)]
    pub mode: RangeStyleArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RangeStyleArg {
    /// 4-band percentage rules around the target.
    Active,
    /// 3-band limit rules up to the target.
    Limit,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input CSV path(s); multiple files are merged after schema validation.
    #[arg(long = "from", num_args = 1.., value_name = "CSV", required = true)]
    pub from: Vec<PathBuf>,

    /// Output JSON path; suffixed _1, _2, ... when it already exists.
    #[arg(long = "to", value_name = "PATH")]
    pub to: PathBuf,

    /// CSV delimiter (e.g. "," or ";" or "\t").
    #[arg(long = "delim", default_value = ",")]
    pub delim: String,
}

#[derive(Parser)]
pub struct UpdateKeyArgs {
    /// Input Rules JSON path.
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Key to update per rule; dot-path allowed, e.g. 'action' or
    /// 'data.spec_id'.
    #[arg(long = "key")]
    pub key: String,

    /// New value; use --as to control its type.
    #[arg(long = "value")]
    pub value: String,

    /// How to interpret --value.
    #[arg(long = "as", value_enum, default_value = "auto")]
    pub as_type: ValueTypeArg,

    /// Only set where the key is missing/empty/null.
    #[arg(long = "only-missing")]
    pub only_missing: bool,

    /// Restrict updates to these parametertype_id values.
    #[arg(long = "parametertype-id", num_args = 0.., value_name = "ID")]
    pub parametertype_ids: Vec<i64>,

    /// Output JSON path (default: derived from the input name).
    #[arg(long = "out", value_name = "PATH", conflicts_with = "inplace")]
    pub out: Option<PathBuf>,

    /// Overwrite the input file in place.
    #[arg(long = "inplace")]
    pub inplace: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValueTypeArg {
    Auto,
    Str,
    Int,
    Float,
    Bool,
    Null,
    Json,
}

#[derive(Parser)]
pub struct UpdateSpecIdArgs {
    /// Input Rules JSON path(s).
    #[arg(long = "in", num_args = 1.., value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// New spec_id to set for all rules.
    #[arg(long = "spec-id")]
    pub spec_id: i64,

    /// Output JSON path. With multiple inputs, all rules are merged into
    /// this one file.
    #[arg(long = "out", value_name = "PATH", conflicts_with = "inplace")]
    pub out: Option<PathBuf>,

    /// Overwrite each input file in place.
    #[arg(long = "inplace")]
    pub inplace: bool,
}

#[derive(Parser)]
pub struct UpdateUnitArgs {
    /// Input Rules JSON path.
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// New unit string to set (e.g. 'mg/kg').
    #[arg(long = "unit", conflicts_with = "clear", required_unless_present = "clear")]
    pub unit: Option<String>,

    /// Clear DDF_unit to null.
    #[arg(long = "clear")]
    pub clear: bool,

    /// Only update rules where DDF_unit is currently missing.
    #[arg(long = "only-missing")]
    pub only_missing: bool,

    /// Restrict updates to these parametertype_id values.
    #[arg(long = "parametertype-id", num_args = 0.., value_name = "ID")]
    pub parametertype_ids: Vec<i64>,

    /// Output JSON path (default: derived from the input name).
    #[arg(long = "out", value_name = "PATH", conflicts_with = "inplace")]
    pub out: Option<PathBuf>,

    /// Overwrite the input file in place.
    #[arg(long = "inplace")]
    pub inplace: bool,
}

#[derive(Parser)]
pub struct RemoveParamArgs {
    /// Input Rules JSON path.
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Parameter id(s) to remove.
    #[arg(long = "param-id", num_args = 1.., value_name = "ID", required = true)]
    pub param_ids: Vec<i64>,

    /// Output JSON path.
    #[arg(long = "out", value_name = "PATH", conflicts_with = "inplace")]
    pub out: Option<PathBuf>,

    /// Modify the input file in place instead of writing a new file.
    #[arg(long = "inplace")]
    pub inplace: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
