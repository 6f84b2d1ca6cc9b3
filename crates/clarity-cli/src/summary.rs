//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use clarity_model::Suggestion;
use clarity_service::{
    AskResponse, CleanResponse, FilesResponse, HistoryResponse, PreviewResponse, Record,
    UploadResponse,
};
use serde_json::Value;

pub fn print_upload(response: &UploadResponse) {
    println!("{}: {}", response.message, response.filename);
    println!(
        "{} rows × {} columns ({})",
        response.rows,
        response.columns.len(),
        response.size
    );
}

pub fn print_files(response: &FilesResponse) {
    if response.files.is_empty() {
        println!("No datasets stored.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dataset"), header_cell("Size (KB)")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for file in &response.files {
        table.add_row(vec![Cell::new(&file.filename), Cell::new(format!("{:.2}", file.size_kb))]);
    }
    println!("{table}");
}

pub fn print_profile(response: &PreviewResponse) {
    let summary = &response.summary;
    println!(
        "{} rows × {} columns, {} duplicate row(s), ~{} KB in memory",
        summary.total_rows,
        summary.total_columns,
        summary.duplicates,
        summary.memory_usage / 1024
    );

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Kind"),
        header_cell("Missing"),
    ]);
    apply_summary_table_style(&mut columns);
    align_column(&mut columns, 3, CellAlignment::Right);
    for column in &summary.columns {
        columns.add_row(vec![
            Cell::new(&column.name),
            dim_cell(&column.dtype),
            Cell::new(column.kind),
            count_cell(column.null_count, Color::Yellow),
        ]);
    }
    println!("{columns}");

    if response.suggestions.is_empty() {
        println!("No issues found.");
    } else {
        let mut suggestions = Table::new();
        suggestions.set_header(vec![
            header_cell("Issue"),
            header_cell("Column"),
            header_cell("Count"),
            header_cell("%"),
            header_cell("Suggested"),
        ]);
        apply_summary_table_style(&mut suggestions);
        align_column(&mut suggestions, 2, CellAlignment::Right);
        align_column(&mut suggestions, 3, CellAlignment::Right);
        for suggestion in &response.suggestions {
            suggestions.add_row(suggestion_row(suggestion));
        }
        println!("{suggestions}");
    }

    print_records("Sample", &response.sample_data);
}

fn suggestion_row(suggestion: &Suggestion) -> Vec<Cell> {
    let (issue, column, action) = match suggestion {
        Suggestion::MissingValues {
            column,
            suggested_strategy,
            ..
        } => ("missing values", column.as_str(), suggested_strategy.as_str()),
        Suggestion::Duplicates { .. } => ("duplicates", "-", "remove duplicates"),
    };
    vec![
        Cell::new(issue),
        Cell::new(column),
        count_cell(suggestion.issue_count(), Color::Yellow),
        Cell::new(format!("{:.2}", suggestion.percentage())),
        Cell::new(action).fg(Color::Cyan),
    ]
}

pub fn print_clean(response: &CleanResponse) {
    println!("{} -> {}", response.message, response.cleaned_filename);

    let mut log = Table::new();
    log.set_header(vec![header_cell("#"), header_cell("Operation"), header_cell("Result")]);
    apply_table_style(&mut log);
    align_column(&mut log, 0, CellAlignment::Right);
    for (idx, record) in response.cleaning_log.iter().enumerate() {
        log.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(record.name()),
            Cell::new(record.describe()),
        ]);
    }
    if response.cleaning_log.is_empty() {
        println!("No operations applied.");
    } else {
        println!("{log}");
    }

    let summary = &response.summary;
    let mut shape = Table::new();
    shape.set_header(vec![header_cell(""), header_cell("Original"), header_cell("Cleaned")]);
    apply_table_style(&mut shape);
    align_column(&mut shape, 1, CellAlignment::Right);
    align_column(&mut shape, 2, CellAlignment::Right);
    shape.add_row(vec![
        Cell::new("Rows"),
        Cell::new(summary.original_rows),
        changed_cell(summary.original_rows, summary.cleaned_rows),
    ]);
    shape.add_row(vec![
        Cell::new("Columns"),
        Cell::new(summary.original_columns),
        changed_cell(summary.original_columns, summary.cleaned_columns),
    ]);
    println!("{shape}");

    print_records("Sample", &response.sample_data);
}

pub fn print_ask(response: &AskResponse) {
    let metadata = &response.metadata;
    println!("{} ({}, {:.2} KB)", metadata.filename, metadata.shape, metadata.size_kb);
    println!();
    println!("{}", response.analysis.explanation);
    println!();
    for insight in &response.analysis.insights {
        println!("- {insight}");
    }

    let mut chart = Table::new();
    chart.set_header(vec![header_cell("Category"), header_cell("Value")]);
    apply_table_style(&mut chart);
    align_column(&mut chart, 1, CellAlignment::Right);
    for point in &response.chart.data {
        chart.add_row(vec![Cell::new(&point.category), Cell::new(format_value(point.value))]);
    }
    let query = &response.analysis.query;
    println!();
    println!(
        "{}: {} by {}",
        response.chart.chart_type,
        query.aggregation,
        query.group_by
    );
    println!("{chart}");
}

pub fn print_history(response: &HistoryResponse) {
    if response.history.is_empty() {
        println!("No questions asked yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Asked"),
        header_cell("Question"),
        header_cell("Chart"),
    ]);
    apply_summary_table_style(&mut table);
    for entry in &response.history {
        let chart = entry
            .chart_config
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("-");
        table.add_row(vec![
            dim_cell(entry.asked_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&entry.question),
            Cell::new(format!("{chart}: {} by {}", entry.query.aggregation, entry.query.group_by)),
        ]);
    }
    println!("{table}");
}

fn print_records(title: &str, records: &[Record]) {
    let Some(first) = records.first() else {
        return;
    };
    let mut table = Table::new();
    table.set_header(first.keys().map(|key| header_cell(key)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for record in records {
        table.add_row(record.values().map(value_cell).collect::<Vec<_>>());
    }
    println!("{title}:");
    println!("{table}");
}

/// Renders a JSON cell; strings without quotes, null dimmed.
pub fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => dim_cell("null"),
        Value::String(text) => Cell::new(text),
        other => Cell::new(other),
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
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
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn changed_cell(before: usize, after: usize) -> Cell {
    if before == after {
        Cell::new(after)
    } else {
        Cell::new(after).fg(Color::Green).add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(40.0), "40");
        assert_eq!(format_value(2.5), "2.50");
    }

    #[test]
    fn test_value_cell_content() {
        assert_eq!(value_cell(&json!("NYC")).content(), "NYC");
        assert_eq!(value_cell(&json!(25)).content(), "25");
        assert_eq!(value_cell(&Value::Null).content(), "null");
    }
}
