//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and `LOOKERSDK_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use henry_config::constants::{DEFAULT_MIN_QUERIES, DEFAULT_TIMEFRAME_DAYS, DEFAULT_WORKERS};
use henry_reports::SortKey;

#[derive(Parser)]
#[command(name = "henry")]
#[command(about = "Henry - health and usage reports for a Looker instance", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  henry pulse\n  henry analyze projects\n  henry analyze explores --model thelook --sortkey \"Query Count\" desc\n  henry vacuum models --project thelook -o csv --save unused.csv\n  henry --profile production --threads 16 vacuum explores\n"
)]
pub struct Cli {
    /// Base URL of the Looker instance (e.g., https://company.looker.com:19999)
    #[arg(long, global = true, env = "LOOKERSDK_BASE_URL")]
    pub base_url: Option<String>,

    /// API3 client ID
    #[arg(long, global = true, env = "LOOKERSDK_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API3 client secret
    #[arg(long, global = true, env = "LOOKERSDK_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "LOOKERSDK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Verify TLS certificates (default)
    #[arg(long, global = true, overrides_with = "no_verify_ssl")]
    pub verify_ssl: bool,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, overrides_with = "verify_ssl")]
    pub no_verify_ssl: bool,

    /// Profile name to load from the config file
    #[arg(long, global = true, env = "HENRY_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides the default location)
    #[arg(long, global = true, env = "HENRY_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Number of concurrent API calls
    #[arg(long, global = true, default_value_t = DEFAULT_WORKERS, value_parser = parse_threads)]
    pub threads: usize,

    /// Usage lookback window in days
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEFRAME_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    pub timeframe: u32,

    /// Minimum query count for something to count as used
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_QUERIES)]
    pub min_queries: u64,

    /// Sort rows by COLUMN, optionally followed by asc or desc
    #[arg(long, global = true, num_args = 1..=2, value_names = ["COLUMN", "ORDER"])]
    pub sortkey: Option<Vec<String>>,

    /// Keep at most N rows (applied after sorting)
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputArg::Table)]
    pub output: OutputArg,

    /// Write results to FILE instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Suppress progress output.
    ///
    /// Progress is always written to STDERR; this flag disables it entirely.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable the per-run query cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Serve Prometheus metrics at ADDR (e.g., 127.0.0.1:9090) while the report runs
    #[arg(long, global = true, env = "HENRY_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze projects, models and explores
    Analyze {
        #[command(subcommand)]
        command: AnalyzeCommand,
    },

    /// Find unused explores, joins and fields
    Vacuum {
        #[command(subcommand)]
        command: VacuumCommand,
    },

    /// Run instance health checks
    Pulse,
}

impl Commands {
    /// Report name used in logs and metrics, e.g. `"vacuum explores"`.
    pub fn report_name(&self) -> &'static str {
        match self {
            Commands::Analyze { command } => match command {
                AnalyzeCommand::Projects { .. } => "analyze projects",
                AnalyzeCommand::Models(_) => "analyze models",
                AnalyzeCommand::Explores(_) => "analyze explores",
            },
            Commands::Vacuum { command } => match command {
                VacuumCommand::Models(_) => "vacuum models",
                VacuumCommand::Explores(_) => "vacuum explores",
            },
            Commands::Pulse => "pulse",
        }
    }
}

#[derive(Subcommand)]
pub enum AnalyzeCommand {
    /// Git status, PR mode and file counts per project
    Projects {
        /// Only analyze this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Explore counts and usage per model
    Models(ModelFilter),
    /// Field, join and usage statistics per explore
    Explores(ExploreFilter),
}

#[derive(Subcommand)]
pub enum VacuumCommand {
    /// Unused explores per model
    Models(ModelFilter),
    /// Unused joins and fields per explore
    Explores(ExploreFilter),
}

#[derive(Args)]
pub struct ModelFilter {
    /// Only models of this project
    #[arg(long)]
    pub project: Option<String>,
    /// Only this model
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args)]
pub struct ExploreFilter {
    /// Only explores of this model
    #[arg(long)]
    pub model: Option<String>,
    /// Only this explore
    #[arg(long)]
    pub explore: Option<String>,
}

fn parse_threads(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// TLS verification override from the flags, if any was given.
    pub fn verify_ssl_override(&self) -> Option<bool> {
        if self.no_verify_ssl {
            Some(false)
        } else if self.verify_ssl {
            Some(true)
        } else {
            None
        }
    }

    /// Parse `--sortkey COLUMN [asc|desc]`.
    pub fn sort_key(&self) -> anyhow::Result<Option<SortKey>> {
        let Some(parts) = &self.sortkey else {
            return Ok(None);
        };
        let column = parts.first().cloned().unwrap_or_default();
        match parts.get(1).map(|o| o.to_ascii_lowercase()).as_deref() {
            None | Some("asc") => Ok(Some(SortKey::ascending(column))),
            Some("desc") => Ok(Some(SortKey::descending(column))),
            Some(other) => anyhow::bail!("Invalid sort order '{other}'. Valid options: asc, desc"),
        }
    }
}
