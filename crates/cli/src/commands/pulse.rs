//! `henry pulse` command implementation.
//!
//! Reports are written as each check completes. With `--save` they are
//! buffered and written once all checks are done.

use anyhow::Result;
use henry_reports::{CheckRegistry, CheckReport};
use tracing::{debug, warn};

use crate::commands::ReportOptions;
use crate::formatters::{get_formatter, output_result};

pub async fn run(opts: &ReportOptions) -> Result<()> {
    if opts.sort.is_some() || opts.limit.is_some() {
        debug!("--sortkey and --limit do not apply to pulse");
    }

    let ctx = opts.connect().await?;
    let registry = CheckRegistry::standard();
    let formatter = get_formatter(opts.format);

    let spinner = opts.spinner("Running health checks");
    let mut buffered = String::new();
    let mut failed = 0usize;
    let mut first_error: Option<anyhow::Error> = None;
    let mut is_first = true;

    let emitted = henry_reports::pulse::run_all(&ctx, &registry, |report: CheckReport| {
        spinner.set_message(format!("{} finished", report.name));
        if report.is_failure() {
            failed += 1;
            warn!(check = %report.name, "check failed");
        }
        if first_error.is_some() {
            return;
        }

        match formatter.format_check_report(&report, is_first) {
            Ok(output) if opts.save.is_some() => buffered.push_str(&output),
            Ok(output) => {
                if let Err(e) = spinner.suspend(|| output_result(&output, opts.format, None)) {
                    first_error = Some(e);
                }
            }
            Err(e) => first_error = Some(e),
        }
        is_first = false;
    })
    .await;
    spinner.finish();
    drop(spinner);

    if let Some(e) = first_error {
        return Err(e);
    }
    debug!(emitted, failed, "pulse finished");

    if opts.save.is_some() {
        output_result(&buffered, opts.format, opts.save.as_ref())?;
    }
    Ok(())
}
