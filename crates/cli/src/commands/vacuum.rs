//! `henry vacuum` command implementation.

use anyhow::{Context, Result};

use crate::args::VacuumCommand;
use crate::commands::ReportOptions;

pub async fn run(command: VacuumCommand, opts: &ReportOptions) -> Result<()> {
    let ctx = opts.connect().await?;

    let spinner = opts.spinner("Vacuuming");
    let records = match &command {
        VacuumCommand::Models(filter) => {
            henry_reports::vacuum::models(&ctx, filter.project.as_deref(), filter.model.as_deref())
                .await
                .context("Failed to vacuum models")?
        }
        VacuumCommand::Explores(filter) => {
            henry_reports::vacuum::explores(&ctx, filter.model.as_deref(), filter.explore.as_deref())
                .await
                .context("Failed to vacuum explores")?
        }
    };
    spinner.finish();
    drop(spinner);

    opts.emit_records(records)
}
