//! CLI output formatting.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use deccalc_core::constants::HISTORY_COLUMNS;
use deccalc_core::history::HistoryRecord;
use deccalc_orchestration::dispatcher::DispatchRequest;

/// Sentence describing one computed result.
#[must_use]
pub fn format_result_line(request: &DispatchRequest<'_>, result: Decimal) -> String {
    let locus = if request.mode.is_isolated() {
        " (isolated)"
    } else {
        ""
    };
    format!(
        "The result of {} {} {}{locus} is {result}",
        request.operand1, request.operation, request.operand2
    )
}

/// Render history rows as a right-aligned table with an index column.
///
/// ```text
///    operation  num1  num2  result
/// 0        add     3     4       7
/// ```
#[must_use]
pub fn format_history_table(rows: &[(usize, &HistoryRecord)]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|(index, record)| {
            [
                index.to_string(),
                record.operation.clone(),
                record.num1.to_string(),
                record.num2.to_string(),
                record.result.to_string(),
            ]
        })
        .collect();

    let header = [
        "",
        HISTORY_COLUMNS[0],
        HISTORY_COLUMNS[1],
        HISTORY_COLUMNS[2],
        HISTORY_COLUMNS[3],
    ];
    let mut widths = header.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    for row in &cells {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Bulleted list of available operation names.
#[must_use]
pub fn format_operation_menu(names: &[&str]) -> String {
    if names.is_empty() {
        return "No operations available.\n".to_string();
    }
    let mut out = String::from("Available operations:\n");
    for name in names {
        let _ = writeln!(out, "- {name}");
    }
    out
}
