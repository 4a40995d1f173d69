//! Console summaries: band range tables and generation counts.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lims_engine::{active_bands, format2, limit3_threshold, quantize2};

use crate::cli::RangeStyleArg;

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Prints the band table for a target without generating any JSON.
pub fn print_ranges(style: RangeStyleArg, target: f64) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Range"), header_cell("Bounds")]);
    apply_table_style(&mut table);

    if target == 0.0 {
        table.add_row(vec!["perfect_range", "0.00"]);
        table.add_row(vec!["not_okay_range", "> 0.00"]);
        println!("{table}");
        return;
    }

    match style {
        RangeStyleArg::Active => {
            let bands = active_bands(target);
            table.add_row(vec![
                "perfect_range".to_string(),
                format!("{} - {}", format2(bands.low_perfect), format2(bands.high_perfect)),
            ]);
            table.add_row(vec![
                "okay_range".to_string(),
                format!("{} - {}", format2(bands.low_ok), format2(bands.low_perfect)),
            ]);
            table.add_row(vec![
                "okay_range_2".to_string(),
                format!("{} - {}", format2(bands.high_perfect), format2(bands.high_ok2)),
            ]);
            table.add_row(vec![
                "not_okay_range".to_string(),
                format!("<{} OR >{}", format2(bands.low_ok), format2(bands.high_ok2)),
            ]);
        }
        RangeStyleArg::Limit => {
            let threshold = limit3_threshold(target);
            let ceiling = quantize2(target);
            table.add_row(vec![
                "perfect_range".to_string(),
                format!("<= {}", format2(threshold)),
            ]);
            table.add_row(vec![
                "okay_range".to_string(),
                format!("{} - {}", format2(threshold), format2(ceiling)),
            ]);
            table.add_row(vec![
                "not_okay_range".to_string(),
                format!("> {}", format2(ceiling)),
            ]);
        }
    }
    println!("{table}");
}

/// One generated parameter for the summary table.
pub struct GeneratedParam {
    pub parametertype_id: i64,
    pub mode: &'static str,
    pub rules: usize,
}

/// Prints the per-parameter generation summary and the output location.
pub fn print_generate_summary(params: &[GeneratedParam], total_rules: usize, out_path: &Path) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Mode"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for param in params {
        table.add_row(vec![
            Cell::new(param.parametertype_id),
            Cell::new(param.mode),
            Cell::new(param.rules),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(total_rules).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Wrote {} rules to {}", total_rules, out_path.display());
}
