use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mds_cli::pipeline::PipelineOutcome;
use mds_model::PipelineReport;

/// Per-variable status of one stage, derived from the report.
#[derive(Clone, Copy, PartialEq, Eq)]
enum StageStatus {
    Passed,
    Failed,
    Skipped,
    NotReached,
}

pub fn print_summary(outcome: &PipelineOutcome) {
    if !outcome.symmetry_issues.is_empty() {
        println!(
            "Symmetry: {} row(s) with mismatched column counts (see log)",
            outcome.symmetry_issues.len()
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Records"),
        header_cell("Split"),
        header_cell("Fetch"),
        header_cell("Metadata"),
        header_cell("Dataset"),
        header_cell("Packaged"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for idx in 2..=6 {
        align_column(&mut table, idx, CellAlignment::Center);
    }

    let report = &outcome.report;
    let mut packaged_count = 0usize;
    for variable in &outcome.variables {
        let row = variable_row(&variable.name, outcome);
        if report.packaged.contains(&variable.name) {
            packaged_count += 1;
        }
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.row_count).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{packaged_count}/{}", outcome.variables.len()))
            .add_attribute(Attribute::Bold),
        count_cell(report.failure_count()),
    ]);
    println!("{table}");

    let errors = collect_errors(report);
    if !errors.is_empty() {
        eprintln!("Errors:");
        for error in errors {
            eprintln!("- {error}");
        }
    }
}

fn variable_row(name: &str, outcome: &PipelineOutcome) -> Vec<Cell> {
    let report = &outcome.report;
    let missing = report.missing_columns.iter().any(|n| n == name);
    let split_failed = lookup(&report.split_errors, name).is_some();
    let split = if missing || split_failed {
        StageStatus::Failed
    } else {
        StageStatus::Passed
    };
    let progressed = split == StageStatus::Passed;

    let fetch = stage_status(
        progressed,
        outcome.fetch_ran,
        lookup(&report.fetch_errors, name).is_some(),
    );
    let metadata_failed = report.metadata_errors.iter().any(|(n, _)| n == name);
    let metadata = stage_status(progressed, true, metadata_failed);
    let dataset_failed = report.dataset_errors.iter().any(|(n, _)| n == name);
    let dataset = stage_status(
        progressed && !metadata_failed,
        true,
        dataset_failed,
    );
    let packaging_failed = lookup(&report.packaging_failures, name).is_some();
    let packaged = stage_status(
        progressed && !metadata_failed && !dataset_failed,
        outcome.package_ran,
        packaging_failed,
    );

    let detail = first_detail(name, outcome);
    let records = if missing {
        dim_cell("-")
    } else {
        Cell::new(outcome.row_count)
    };
    vec![
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
        records,
        if missing {
            Cell::new("missing").fg(Color::Yellow)
        } else {
            status_cell(split)
        },
        status_cell(fetch),
        status_cell(metadata),
        status_cell(dataset),
        status_cell(packaged),
        detail,
    ]
}

fn stage_status(reached: bool, ran: bool, failed: bool) -> StageStatus {
    if !reached {
        StageStatus::NotReached
    } else if !ran {
        StageStatus::Skipped
    } else if failed {
        StageStatus::Failed
    } else {
        StageStatus::Passed
    }
}

fn first_detail(name: &str, outcome: &PipelineOutcome) -> Cell {
    let report = &outcome.report;
    if report.missing_columns.iter().any(|n| n == name) {
        return Cell::new("column not found in wide table").fg(Color::Yellow);
    }
    let detail = lookup(&report.split_errors, name)
        .or_else(|| lookup(&report.fetch_errors, name))
        .or_else(|| {
            report
                .metadata_errors
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, errors)| errors.first().map(String::as_str))
        })
        .or_else(|| {
            report
                .dataset_errors
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, errors)| errors.first().map(String::as_str))
        })
        .or_else(|| lookup(&report.packaging_failures, name));
    match detail {
        Some(message) => Cell::new(message).fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn collect_errors(report: &PipelineReport) -> Vec<String> {
    let mut errors = Vec::new();
    for (name, message) in &report.split_errors {
        errors.push(format!("{name}: split: {message}"));
    }
    for (name, message) in &report.fetch_errors {
        errors.push(format!("{name}: fetch: {message}"));
    }
    for (name, messages) in &report.metadata_errors {
        for message in messages {
            errors.push(format!("{name}: metadata: {message}"));
        }
    }
    for (name, messages) in &report.dataset_errors {
        for message in messages {
            errors.push(format!("{name}: dataset: {message}"));
        }
    }
    for (name, message) in &report.packaging_failures {
        errors.push(format!("{name}: packaging: {message}"));
    }
    errors
}

fn lookup<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, message)| message.as_str())
}

fn status_cell(status: StageStatus) -> Cell {
    match status {
        StageStatus::Passed => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        StageStatus::Failed => Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold),
        StageStatus::Skipped => dim_cell("skip"),
        StageStatus::NotReached => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
