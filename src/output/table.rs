use crate::stats::{AggregatedOutput, Dimension};

pub const HEADERS: [&str; 10] = [
    "Tag",
    "Count",
    "Author",
    "Count",
    "Directory",
    "Count",
    "Severity",
    "Count",
    "Type",
    "Count",
];

/// Column pair order of the table.
const COLUMNS: [Dimension; 5] = [
    Dimension::Tags,
    Dimension::Authors,
    Dimension::Directory,
    Dimension::Severity,
    Dimension::Types,
];

/// Cell matrix: one row per rank, blanks where a dimension ran out or is absent.
pub fn rows(output: &AggregatedOutput) -> Vec<[String; 10]> {
    let mut rows: Vec<[String; 10]> = vec![Default::default(); output.max_rows()];
    for (pair, dimension) in COLUMNS.iter().enumerate() {
        let Some(entries) = output.get(*dimension) else {
            continue;
        };
        for (row, entry) in rows.iter_mut().zip(entries) {
            row[pair * 2] = entry.name.clone();
            row[pair * 2 + 1] = entry.count.to_string();
        }
    }
    rows
}

/// Render as a markdown-style table with side borders.
pub fn render(output: &AggregatedOutput) -> String {
    let rows = rows(output);

    let mut widths: [usize; 10] = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().copied(), &widths);
    out.push('|');
    for width in &widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('|');
    }
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 10]) {
    out.push('|');
    for (cell, width) in cells.zip(widths) {
        out.push_str(&format!(" {:<width$} |", cell, width = *width));
    }
    out.push('\n');
}
