//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render rows as aligned columns for terminals.
//! - Expand multi-line cells (newline-joined lists) into stacked lines.
//!
//! Does NOT handle:
//! - Terminal width detection; long cells widen their column.

use anyhow::Result;
use henry_reports::{CheckOutcome, CheckReport, ResolvedRecord};

use crate::formatters::Formatter;

const COLUMN_GAP: &str = "  ";

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_records(&self, records: &[ResolvedRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok("No results found.\n".to_string());
        }
        Ok(render_table(records))
    }

    fn format_check_report(&self, report: &CheckReport, is_first: bool) -> Result<String> {
        let mut output = String::new();
        if !is_first {
            output.push('\n');
        }
        for line in report.title.lines() {
            output.push_str(line);
            output.push('\n');
        }
        output.push_str(&"=".repeat(title_width(&report.title)));
        output.push('\n');

        match &report.outcome {
            CheckOutcome::Rows(rows) if rows.is_empty() => output.push_str("No results found.\n"),
            CheckOutcome::Rows(rows) => output.push_str(&render_table(rows)),
            CheckOutcome::Error(message) => {
                output.push_str("Check failed: ");
                output.push_str(message);
                output.push('\n');
            }
        }
        Ok(output)
    }
}

fn title_width(title: &str) -> usize {
    title.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Lay out rows under the header of the first row.
fn render_table(records: &[ResolvedRecord]) -> String {
    let headers: Vec<&str> = records.first().map(|r| r.columns().collect()).unwrap_or_default();

    // Each row becomes one Vec of lines per column.
    let rows: Vec<Vec<Vec<String>>> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|column| {
                    let text = record.get(column).map(ToString::to_string).unwrap_or_default();
                    text.lines().map(str::to_string).collect()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .flat_map(|row| row[i].iter())
                .map(|line| line.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    push_line(&mut output, headers.iter().copied(), &widths);
    push_line(
        &mut output,
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().iter().map(String::as_str),
        &widths,
    );

    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for line_idx in 0..height {
            let cells = row
                .iter()
                .map(|lines| lines.get(line_idx).map(String::as_str).unwrap_or(""));
            push_line(&mut output, cells, &widths);
        }
    }
    output
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support;

    #[test]
    fn test_empty_records() {
        assert_eq!(TableFormatter.format_records(&[]).unwrap(), "No results found.\n");
    }

    #[test]
    fn test_columns_are_aligned() {
        let output = TableFormatter.format_records(&test_support::records()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Model      Model Query Count       Unused Explores");
        assert!(lines[1].starts_with("---------  ----------------------  ---------------"));
        assert_eq!(lines[2], format!("thelook    42{}inventory", " ".repeat(22)));
    }

    #[test]
    fn test_multi_line_cells_stack() {
        let output = TableFormatter.format_records(&test_support::records()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[3], format!("{}orders_legacy", " ".repeat(35)));
        assert_eq!(lines[4], "ecommerce  error: API error (503)");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_check_report_section() {
        let output = TableFormatter
            .format_check_report(&test_support::connections_report(), true)
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Checking connections");
        assert_eq!(lines[1], "=".repeat("Checking connections".len()));
        assert!(lines[2].starts_with("Connection"));
        assert!(lines[4].starts_with("warehouse"));
    }

    #[test]
    fn test_failed_check_report() {
        let output = TableFormatter
            .format_check_report(&test_support::failed_report(), false)
            .unwrap();

        assert!(output.starts_with('\n'));
        assert!(output.contains("Check failed: API error (403): forbidden"));
    }
}
