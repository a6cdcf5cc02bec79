//! Looker API client.
//!
//! This crate provides a typed client for the Looker API 4.0 endpoints henry
//! reads from, and the [`LookerApi`] trait the report engine consumes. It
//! supports API3 client credentials (exchanged for an access token at login)
//! and pre-issued access tokens.

mod api;
mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::LookerApi;
pub use auth::{AuthStrategy, SessionManager};
pub use client::LookerClient;
pub use client::builder::LookerClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::ErrorCategory;
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    DbConnection, DbConnectionTestResult, GitConnectionTest, GitConnectionTestResult,
    LegacyFeature, LookmlModel, LookmlModelExplore, LookmlModelNavExplore, Project, ProjectFile,
    PullRequestMode, Workspace, WriteQuery,
};
