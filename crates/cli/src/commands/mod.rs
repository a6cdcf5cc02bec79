//! CLI command implementations.
//!
//! Every report command follows the same path: build a [`LookerClient`],
//! log in once, wrap it in a [`ReportContext`] sized by `--threads`, run the
//! report under a spinner, then format and emit.

pub mod analyze;
pub mod pulse;
pub mod vacuum;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use henry_client::{LookerApi, LookerClient};
use henry_config::Config;
use henry_reports::{ReportContext, ResolvedRecord, SortKey, UsageWindow, apply_sort_limit};
use tracing::info;

use crate::formatters::{OutputFormat, get_formatter, output_result};
use crate::progress::Spinner;

/// Settings shared by every report command.
pub struct ReportOptions {
    pub config: Config,
    pub workers: usize,
    pub window: UsageWindow,
    pub sort: Option<SortKey>,
    pub limit: Option<usize>,
    pub format: OutputFormat,
    pub save: Option<PathBuf>,
    pub quiet: bool,
    pub no_cache: bool,
}

impl ReportOptions {
    /// Connect to Looker and build the shared report context.
    pub(crate) async fn connect(&self) -> Result<ReportContext> {
        let client = LookerClient::builder()
            .from_config(&self.config)
            .cache_queries(!self.no_cache)
            .build()
            .context("Failed to build Looker client")?;

        info!("Connecting to {}", self.config.connection.base_url);
        client
            .login()
            .await
            .context("Failed to authenticate with Looker")?;

        let api: Arc<dyn LookerApi> = Arc::new(client);
        Ok(ReportContext::new(api, self.workers, self.window)?)
    }

    pub(crate) fn spinner(&self, label: &str) -> Spinner {
        Spinner::new(!self.quiet, label)
    }

    /// Sort, limit, format and print the rows of a finished report.
    pub(crate) fn emit_records(&self, records: Vec<ResolvedRecord>) -> Result<()> {
        let records = apply_sort_limit(records, self.sort.as_ref(), self.limit)?;
        let output = get_formatter(self.format).format_records(&records)?;
        output_result(&output, self.format, self.save.as_ref())
    }
}
