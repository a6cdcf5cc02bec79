//! JSON formatter implementation.

use anyhow::Result;
use henry_reports::{CheckReport, ResolvedRecord};

use crate::formatters::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_records(&self, records: &[ResolvedRecord]) -> Result<String> {
        let mut output = serde_json::to_string_pretty(records)?;
        output.push('\n');
        Ok(output)
    }

    fn format_check_report(&self, report: &CheckReport, _is_first: bool) -> Result<String> {
        // NDJSON: one report per line, in completion order
        let mut line = serde_json::to_string(report)?;
        line.push('\n');
        Ok(line)
    }
}
