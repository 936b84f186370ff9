//! Rendering of translations, expansions and mapping entries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use gem_map::{SourceOutcome, Translation};
use gem_model::{Code, Direction, MappingEntry, TargetCode};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per source code with the targets it selected.
pub fn translation_table(translation: &Translation) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Targets"),
        header_cell("Approximate"),
        header_cell("No map"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for outcome in &translation.sources {
        table.add_row(vec![
            Cell::new(&outcome.source).add_attribute(Attribute::Bold),
            targets_cell(&outcome.targets),
            flag_cell(outcome.approximate, Color::Yellow),
            flag_cell(outcome.no_map, Color::Red),
        ]);
    }
    table
}

/// One row per target row of a mapping entry, in file order.
pub fn entry_table(entry: &MappingEntry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Flags"),
        header_cell("Approximate"),
        header_cell("No map"),
        header_cell("Combination"),
        header_cell("Scenario"),
        header_cell("Choice list"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    for target in &entry.targets {
        table.add_row(target_row(target));
    }
    table
}

fn target_row(target: &TargetCode) -> Vec<Cell> {
    let code = match &target.code {
        Some(code) => Cell::new(code).add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    };
    let (scenario, choice_list) = match target.choice_list {
        Some(slot) => (Cell::new(slot.scenario), Cell::new(slot.choice_list)),
        None => (dim_cell("-"), dim_cell("-")),
    };
    vec![
        code,
        Cell::new(target.flags()),
        flag_cell(target.approximate, Color::Yellow),
        flag_cell(target.no_map, Color::Red),
        flag_cell(target.combination, Color::Cyan),
        scenario,
        choice_list,
    ]
}

/// Codes one per line.
pub fn code_lines(codes: &[Code]) -> String {
    codes
        .iter()
        .map(Code::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct TranslationReport<'a> {
    direction: Direction,
    targets: &'a [Code],
    sources: &'a [SourceOutcome],
}

/// The translation and its direction as pretty-printed JSON.
pub fn translation_json(direction: Direction, translation: &Translation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TranslationReport {
        direction,
        targets: &translation.targets,
        sources: &translation.sources,
    })
}

/// One-line totals printed under the table output.
pub fn translation_summary(direction: Direction, translation: &Translation) -> String {
    format!(
        "{direction}: {} source code(s) -> {} target code(s), {} approximate, {} without equivalent",
        translation.sources.len(),
        translation.targets.len(),
        translation.approximate_count(),
        translation.no_map_count(),
    )
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn targets_cell(targets: &[Code]) -> Cell {
    if targets.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(
            targets
                .iter()
                .map(Code::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

fn flag_cell(set: bool, color: Color) -> Cell {
    if set {
        Cell::new("yes").fg(color)
    } else {
        dim_cell("no")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
