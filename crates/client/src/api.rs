//! The remote data access seam used by the report engine.
//!
//! Reports only ever talk to Looker through [`LookerApi`]; the production
//! implementation is [`LookerClient`], tests substitute an in-memory double.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::LookerClient;
use crate::error::Result;
use crate::models::{
    DbConnection, DbConnectionTestResult, GitConnectionTest, GitConnectionTestResult,
    LegacyFeature, LookmlModel, LookmlModelExplore, Project, ProjectFile, Workspace, WriteQuery,
};

/// Read-only operations against a Looker instance.
///
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait LookerApi: Send + Sync {
    async fn all_projects(&self) -> Result<Vec<Project>>;
    async fn project(&self, project_id: &str) -> Result<Project>;
    async fn all_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>>;
    async fn all_git_connection_tests(&self, project_id: &str) -> Result<Vec<GitConnectionTest>>;
    async fn run_git_connection_test(
        &self,
        project_id: &str,
        test_id: &str,
    ) -> Result<GitConnectionTestResult>;
    async fn update_session_workspace(&self, workspace: Workspace) -> Result<()>;

    async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>>;
    async fn lookml_model(&self, model: &str) -> Result<LookmlModel>;
    async fn lookml_model_explore(&self, model: &str, explore: &str) -> Result<LookmlModelExplore>;

    /// Run a query and return its rows as JSON objects keyed by field name.
    async fn run_inline_query(&self, query: &WriteQuery) -> Result<Vec<Value>>;

    async fn all_connections(&self) -> Result<Vec<DbConnection>>;
    async fn test_connection(
        &self,
        connection: &str,
        tests: &[String],
    ) -> Result<Vec<DbConnectionTestResult>>;

    async fn all_legacy_features(&self) -> Result<Vec<LegacyFeature>>;
}

#[async_trait]
impl LookerApi for LookerClient {
    async fn all_projects(&self) -> Result<Vec<Project>> {
        self.list_projects().await
    }

    async fn project(&self, project_id: &str) -> Result<Project> {
        self.get_project(project_id).await
    }

    async fn all_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        self.list_project_files(project_id).await
    }

    async fn all_git_connection_tests(&self, project_id: &str) -> Result<Vec<GitConnectionTest>> {
        self.list_git_connection_tests(project_id).await
    }

    async fn run_git_connection_test(
        &self,
        project_id: &str,
        test_id: &str,
    ) -> Result<GitConnectionTestResult> {
        LookerClient::run_git_connection_test(self, project_id, test_id).await
    }

    async fn update_session_workspace(&self, workspace: Workspace) -> Result<()> {
        LookerClient::update_session_workspace(self, workspace).await
    }

    async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>> {
        self.list_lookml_models().await
    }

    async fn lookml_model(&self, model: &str) -> Result<LookmlModel> {
        self.get_lookml_model(model).await
    }

    async fn lookml_model_explore(&self, model: &str, explore: &str) -> Result<LookmlModelExplore> {
        self.get_lookml_model_explore(model, explore).await
    }

    async fn run_inline_query(&self, query: &WriteQuery) -> Result<Vec<Value>> {
        LookerClient::run_inline_query(self, query).await
    }

    async fn all_connections(&self) -> Result<Vec<DbConnection>> {
        self.list_connections().await
    }

    async fn test_connection(
        &self,
        connection: &str,
        tests: &[String],
    ) -> Result<Vec<DbConnectionTestResult>> {
        LookerClient::test_connection(self, connection, tests).await
    }

    async fn all_legacy_features(&self) -> Result<Vec<LegacyFeature>> {
        self.list_legacy_features().await
    }
}
