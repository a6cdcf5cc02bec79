//! Output formatters for report commands.
//!
//! Responsibilities:
//! - Render resolved report rows and pulse check reports as table, JSON or CSV.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings, see `common::output_result`).
//! - Sorting or limiting rows (done before formatting).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior |
//! |--------|---------------------|
//! | JSON | `[]` |
//! | CSV | empty output |
//! | Table | `No results found.` |
//!
//! Pulse reports are formatted one at a time as each check completes. JSON
//! renders each report as a single line (NDJSON) so the stream stays parseable.

use anyhow::Result;
use henry_reports::{CheckReport, ResolvedRecord};

use crate::args::OutputArg;

mod common;
mod csv;
mod json;
mod table;

pub use common::output_result;
pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Table => OutputFormat::Table,
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Formatter trait for report output.
pub trait Formatter {
    /// Format the rows of an analyze or vacuum report.
    fn format_records(&self, records: &[ResolvedRecord]) -> Result<String>;

    /// Format one pulse check report. `is_first` is true for the first report of a run.
    fn format_check_report(&self, report: &CheckReport, is_first: bool) -> Result<String>;
}

/// Get a formatter for the given format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use henry_reports::{Cell, CheckOutcome, CheckReport, ResolvedRecord};

    pub fn records() -> Vec<ResolvedRecord> {
        vec![
            ResolvedRecord::from_pairs([
                ("Model", Cell::text("thelook")),
                ("Model Query Count", Cell::Int(42)),
                ("Unused Explores", Cell::text("inventory\norders_legacy")),
            ]),
            ResolvedRecord::from_pairs([
                ("Model", Cell::text("ecommerce")),
                ("Model Query Count", Cell::Error("API error (503)".to_string())),
                ("Unused Explores", Cell::text("")),
            ]),
        ]
    }

    pub fn connections_report() -> CheckReport {
        CheckReport {
            name: "db_connections".to_string(),
            title: "Checking connections".to_string(),
            outcome: CheckOutcome::Rows(vec![ResolvedRecord::from_pairs([
                ("Connection", Cell::text("warehouse")),
                ("Status", Cell::text("OK")),
                ("Query Count", Cell::Int(12)),
            ])]),
        }
    }

    pub fn failed_report() -> CheckReport {
        CheckReport {
            name: "legacy_features".to_string(),
            title: "Checking legacy features".to_string(),
            outcome: CheckOutcome::Error("API error (403): forbidden".to_string()),
        }
    }
}
