//! Henry - health and usage reports for a Looker instance.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load configuration from `.env`, the profile file, the environment and CLI flags.
//! - Run the selected report and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Report logic or Looker API calls (see `crates/reports` and `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only report output.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod progress;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use henry_client::MetricsExporter;
use henry_config::{Config, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let _metrics_exporter = match cli.metrics_bind.as_deref() {
        Some(bind_addr) => match MetricsExporter::install(bind_addr) {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        },
        None => None,
    };

    let result = match build_config(&cli) {
        Ok(config) => run_command(cli, config).await,
        Err(e) => Err(e),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Merge profile, environment and CLI flags, in increasing priority.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    // Blank values are ignored to allow fallback to the default location
    if let Some(ref path) = cli.config_path
        && !path.as_os_str().to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(ref profile_name) = cli.profile {
        loader = loader.with_profile_name(profile_name.clone());
    }

    loader = loader
        .from_profile()
        .context("Failed to load configuration from profile")?
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref client_id) = cli.client_id {
        loader = loader.with_client_id(client_id.clone());
    }
    if let Some(ref secret) = cli.client_secret {
        loader = loader.with_client_secret(secret.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(verify) = cli.verify_ssl_override() {
        loader = loader.with_verify_ssl(verify);
    }

    loader.build().context("Failed to build configuration")
}
