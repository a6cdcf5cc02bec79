//! Data models for Looker API responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod connection;
pub mod legacy;
pub mod lookml;
pub mod project;
pub mod query;
pub mod session;

pub use connection::{DbConnection, DbConnectionTestResult, Dialect};
pub use legacy::LegacyFeature;
pub use lookml::{
    LookmlModel, LookmlModelExplore, LookmlModelExploreField, LookmlModelExploreFieldset,
    LookmlModelExploreJoin, LookmlModelNavExplore,
};
pub use project::{GitConnectionTest, GitConnectionTestResult, Project, ProjectFile, PullRequestMode};
pub use query::WriteQuery;
pub use session::{AccessToken, ApiSession, Workspace};

/// Looker error body, e.g. `{"message": "Not found", "documentation_url": "..."}`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LookerErrorBody {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
