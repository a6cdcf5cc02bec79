//! `henry analyze` command implementation.

use anyhow::{Context, Result};

use crate::args::AnalyzeCommand;
use crate::commands::ReportOptions;

pub async fn run(command: AnalyzeCommand, opts: &ReportOptions) -> Result<()> {
    let ctx = opts.connect().await?;

    let spinner = opts.spinner("Analyzing");
    let records = match &command {
        AnalyzeCommand::Projects { project } => {
            henry_reports::analyze::projects(&ctx, project.as_deref())
                .await
                .context("Failed to analyze projects")?
        }
        AnalyzeCommand::Models(filter) => {
            henry_reports::analyze::models(&ctx, filter.project.as_deref(), filter.model.as_deref())
                .await
                .context("Failed to analyze models")?
        }
        AnalyzeCommand::Explores(filter) => {
            henry_reports::analyze::explores(&ctx, filter.model.as_deref(), filter.explore.as_deref())
                .await
                .context("Failed to analyze explores")?
        }
    };
    spinner.finish();
    drop(spinner);

    opts.emit_records(records)
}
