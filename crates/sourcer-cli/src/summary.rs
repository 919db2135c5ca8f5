use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sourcer_core::GeneralizerRegistry;
use sourcer_reference::LoadSummary;

use crate::types::{GeneralizeResult, RecordOutcome};

pub fn print_summary(result: &GeneralizeResult) {
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }
    let mut table = summary_table(result, true);
    apply_table_style(&mut table);
    eprintln!("{table}");
    eprintln!(
        "{} record(s), {} invalid",
        result.outcomes.len(),
        result.invalid_count()
    );
}

/// Per-record summary: index, provider, source type, record type, validity.
pub fn summary_table(result: &GeneralizeResult, styled: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#", styled),
        header_cell("Provider", styled),
        header_cell("Source", styled),
        header_cell("Record type", styled),
        header_cell("Valid", styled),
    ]);
    for outcome in &result.outcomes {
        table.add_row(vec![
            Cell::new(outcome.index),
            Cell::new(&outcome.provider),
            optional_cell(outcome.record.source_type.map(|source| source.to_string())),
            optional_cell(outcome.record.record_type.map(|kind| kind.to_string())),
            valid_cell(outcome, styled),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    table
}

pub fn print_reference_summary(summary: &LoadSummary) {
    println!("Reference data: {}", summary.reference_dir.display());
    let mut table = reference_table(summary);
    apply_table_style(&mut table);
    println!("{table}");
}

pub fn reference_table(summary: &LoadSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Rows"]);
    for (kind, count) in &summary.table_counts {
        table.add_row(vec![Cell::new(kind), Cell::new(count)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Registered providers with the record-type codes they dispatch on.
pub fn providers_table(registry: &GeneralizerRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Provider", "Description", "Record kinds"]);
    for (code, description) in registry.providers() {
        let kinds = registry
            .get(code)
            .map(|generalizer| generalizer.record_kinds().join(", "))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(code),
            Cell::new(description),
            optional_cell(Some(kinds).filter(|kinds| !kinds.is_empty())),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str, styled: bool) -> Cell {
    if styled {
        Cell::new(label)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(label)
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    Cell::new(value.unwrap_or_else(|| "-".to_string()))
}

fn valid_cell(outcome: &RecordOutcome, styled: bool) -> Cell {
    match (outcome.is_valid(), styled) {
        (true, true) => Cell::new("yes").fg(Color::Green),
        (false, true) => Cell::new("no").fg(Color::Red).add_attribute(Attribute::Bold),
        (true, false) => Cell::new("yes"),
        (false, false) => Cell::new("no"),
    }
}

#[cfg(test)]
mod tests {
    use comfy_table::presets::ASCII_MARKDOWN;
    use sourcer_model::{CanonicalRecord, RecordType, SourceType};

    use super::*;

    fn outcome(index: usize, provider: &str, record: CanonicalRecord) -> RecordOutcome {
        RecordOutcome {
            index,
            provider: provider.to_string(),
            record,
        }
    }

    #[test]
    fn summary_lists_each_record() {
        let valid = CanonicalRecord {
            source_type: Some(SourceType::Record),
            record_type: Some(RecordType::Census),
            has_valid_data: true,
            ..CanonicalRecord::for_provider("fs")
        };
        let result = GeneralizeResult {
            outcomes: vec![
                outcome(1, "fs", valid),
                outcome(2, "scotp", CanonicalRecord::for_provider("scotp")),
            ],
            output: None,
        };

        let mut table = summary_table(&result, false);
        table.load_preset(ASCII_MARKDOWN);
        insta::assert_snapshot!(table.to_string(), @r"
        | # | Provider | Source | Record type | Valid |
        |---|----------|--------|-------------|-------|
        | 1 | fs       | record | Census      |  yes  |
        | 2 | scotp    | -      | -           |  no   |
        ");
    }

    #[test]
    fn providers_table_lists_scotp_codes() {
        let registry = sourcer_core::build_registry(std::sync::Arc::new(
            sourcer_reference::ReferenceTables::empty(),
        ));
        let rendered = providers_table(&registry).to_string();
        assert!(rendered.contains("FamilySearch"));
        assert!(rendered.contains("stat_births"));
        assert!(rendered.contains("soldiers_wills"));
    }
}
