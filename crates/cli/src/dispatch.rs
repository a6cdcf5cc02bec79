//! Command dispatch logic.
//!
//! Responsibilities:
//! - Turn global CLI options into [`ReportOptions`].
//! - Route parsed CLI arguments to the report command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use std::time::Instant;

use anyhow::Result;
use henry_config::Config;
use henry_reports::UsageWindow;
use henry_reports::metrics::{self, Outcome};

use crate::args::{Cli, Commands};
use crate::commands::{self, ReportOptions};

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let opts = ReportOptions {
        config,
        workers: cli.threads,
        window: UsageWindow::new(cli.timeframe, cli.min_queries),
        sort: cli.sort_key()?,
        limit: cli.limit,
        format: cli.output.into(),
        save: cli.save.clone(),
        quiet: cli.quiet,
        no_cache: cli.no_cache,
    };

    let report = cli.command.report_name();
    let started = Instant::now();
    let result = match cli.command {
        Commands::Analyze { command } => commands::analyze::run(command, &opts).await,
        Commands::Vacuum { command } => commands::vacuum::run(command, &opts).await,
        Commands::Pulse => commands::pulse::run(&opts).await,
    };

    let outcome = if result.is_ok() { Outcome::Ok } else { Outcome::Error };
    metrics::record_report(report, opts.workers, outcome, started.elapsed());
    tracing::debug!(report, elapsed_ms = started.elapsed().as_millis() as u64, "report finished");
    result
}
