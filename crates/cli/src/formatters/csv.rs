//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format report rows as RFC 4180 CSV via the `csv` crate.
//! - Format pulse check reports as one CSV block per check, prefixed with a `Check` column.

use anyhow::{Context, Result};
use henry_reports::{CheckOutcome, CheckReport, ResolvedRecord};

use crate::formatters::Formatter;

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_records(&self, records: &[ResolvedRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok(String::new());
        }
        write_csv(|w| write_rows(w, None, records))
    }

    fn format_check_report(&self, report: &CheckReport, is_first: bool) -> Result<String> {
        let block = write_csv(|w| match &report.outcome {
            CheckOutcome::Rows(rows) if rows.is_empty() => {
                w.write_record(["Check"]).context("Failed to write CSV header")?;
                w.write_record([report.name.as_str()])
                    .context("Failed to write CSV record")
            }
            CheckOutcome::Rows(rows) => write_rows(w, Some(&report.name), rows),
            CheckOutcome::Error(message) => {
                w.write_record(["Check", "Error"]).context("Failed to write CSV header")?;
                w.write_record([report.name.as_str(), message.as_str()])
                    .context("Failed to write CSV record")
            }
        })?;

        if is_first {
            Ok(block)
        } else {
            Ok(format!("\n{block}"))
        }
    }
}

fn write_csv<F>(body: F) -> Result<String>
where
    F: FnOnce(&mut csv::Writer<&mut Vec<u8>>) -> Result<()>,
{
    let mut buffer = Vec::new();
    {
        let mut w = csv::Writer::from_writer(&mut buffer);
        body(&mut w)?;
        w.flush().context("Failed to flush CSV writer")?;
    }
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}

fn write_rows(
    w: &mut csv::Writer<&mut Vec<u8>>,
    check: Option<&str>,
    records: &[ResolvedRecord],
) -> Result<()> {
    let headers: Vec<&str> = records.first().map(|r| r.columns().collect()).unwrap_or_default();

    let header_row: Vec<&str> = check.map(|_| "Check").into_iter().chain(headers.iter().copied()).collect();
    w.write_record(&header_row).context("Failed to write CSV headers")?;

    for record in records {
        let row: Vec<String> = check
            .map(str::to_string)
            .into_iter()
            .chain(headers.iter().map(|column| {
                record.get(column).map(ToString::to_string).unwrap_or_default()
            }))
            .collect();
        w.write_record(&row).context("Failed to write CSV record")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support;

    #[test]
    fn test_empty_records() {
        assert_eq!(CsvFormatter.format_records(&[]).unwrap(), "");
    }

    #[test]
    fn test_records_quote_multi_line_cells() {
        let output = CsvFormatter.format_records(&test_support::records()).unwrap();

        assert!(output.starts_with("Model,Model Query Count,Unused Explores\n"));
        assert!(output.contains("thelook,42,\"inventory\norders_legacy\"\n"));
        assert!(output.contains("ecommerce,error: API error (503),\n"));
    }

    #[test]
    fn test_check_report_has_check_column() {
        let output = CsvFormatter
            .format_check_report(&test_support::connections_report(), true)
            .unwrap();

        assert_eq!(
            output,
            "Check,Connection,Status,Query Count\ndb_connections,warehouse,OK,12\n"
        );
    }

    #[test]
    fn test_failed_check_report() {
        let output = CsvFormatter
            .format_check_report(&test_support::failed_report(), false)
            .unwrap();

        assert_eq!(
            output,
            "\nCheck,Error\nlegacy_features,API error (403): forbidden\n"
        );
    }
}
