//! In-memory [`LookerApi`] double for report tests.
//!
//! Responses are configured up front with the `with_*` builders. Every call
//! is counted under its operation name and under `operation:argument`;
//! latency and failures can be injected under either key.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use henry_client::models::{
    Dialect, LookmlModelExploreField, LookmlModelExploreFieldset, LookmlModelExploreJoin,
};
use henry_client::{
    ClientError, DbConnection, DbConnectionTestResult, GitConnectionTest, GitConnectionTestResult,
    LegacyFeature, LookerApi, LookmlModel, LookmlModelExplore, LookmlModelNavExplore, Project,
    ProjectFile, PullRequestMode, Result, Workspace, WriteQuery,
};
use serde_json::Value;

type QueryMatcher = Box<dyn Fn(&WriteQuery) -> bool + Send + Sync>;

#[derive(Default)]
pub struct FakeLooker {
    projects: Vec<Project>,
    project_files: HashMap<String, Vec<ProjectFile>>,
    git_tests: HashMap<String, Vec<(GitConnectionTest, GitConnectionTestResult)>>,
    models: Vec<LookmlModel>,
    explores: HashMap<(String, String), LookmlModelExplore>,
    queries: Vec<(QueryMatcher, Vec<Value>)>,
    connections: Vec<DbConnection>,
    connection_results: HashMap<String, Vec<DbConnectionTestResult>>,
    legacy_features: Vec<LegacyFeature>,
    latency: HashMap<String, Duration>,
    failures: HashMap<String, (u16, String)>,
    calls: Mutex<HashMap<String, usize>>,
    workspaces: Mutex<Vec<Workspace>>,
    file_listings: Mutex<Vec<Workspace>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeLooker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project, files: Vec<ProjectFile>) -> Self {
        self.project_files.insert(project.id.clone(), files);
        self.projects.push(project);
        self
    }

    /// Git tests for a project, each paired with the result it returns.
    pub fn with_git_tests(mut self, project_id: &str, tests: Vec<(&str, &str)>) -> Self {
        let tests = tests
            .into_iter()
            .map(|(id, status)| {
                (
                    GitConnectionTest {
                        id: id.to_string(),
                        description: None,
                    },
                    GitConnectionTestResult {
                        id: Some(id.to_string()),
                        message: Some(format!("{id} {status}")),
                        status: status.to_string(),
                    },
                )
            })
            .collect();
        self.git_tests.insert(project_id.to_string(), tests);
        self
    }

    pub fn with_model(mut self, model: LookmlModel) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_explore(mut self, explore: LookmlModelExplore) -> Self {
        self.explores
            .insert((explore.model_name.clone(), explore.name.clone()), explore);
        self
    }

    /// Rows returned for every query accepted by `matcher`; first match wins.
    pub fn with_query_rows<M>(mut self, matcher: M, rows: Vec<Value>) -> Self
    where
        M: Fn(&WriteQuery) -> bool + Send + Sync + 'static,
    {
        self.queries.push((Box::new(matcher), rows));
        self
    }

    pub fn with_connection(mut self, connection: DbConnection, results: Vec<DbConnectionTestResult>) -> Self {
        self.connection_results.insert(connection.name.clone(), results);
        self.connections.push(connection);
        self
    }

    pub fn with_legacy_feature(mut self, name: &str, enabled: bool) -> Self {
        self.legacy_features.push(LegacyFeature {
            id: name.to_string(),
            name: Some(name.to_string()),
            description: None,
            enabled,
        });
        self
    }

    /// Delay calls matching `key` (`operation` or `operation:argument`).
    pub fn with_latency(mut self, key: &str, delay: Duration) -> Self {
        self.latency.insert(key.to_string(), delay);
        self
    }

    /// Fail calls matching `key` with an API error.
    pub fn with_failure(mut self, key: &str, status: u16, message: &str) -> Self {
        self.failures
            .insert(key.to_string(), (status, message.to_string()));
        self
    }

    /// Number of calls recorded under `key`.
    pub fn calls(&self, key: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of calls in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Workspace switches in call order.
    pub fn workspace_switches(&self) -> Vec<Workspace> {
        self.workspaces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Session workspace in effect when each project file listing returned.
    pub fn file_listing_workspaces(&self) -> Vec<Workspace> {
        self.file_listings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn enter(&self, op: &str, arg: Option<&str>) -> Result<()> {
        let keyed = arg.map(|a| format!("{op}:{a}"));
        {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *calls.entry(op.to_string()).or_insert(0) += 1;
            if let Some(keyed) = &keyed {
                *calls.entry(keyed.clone()).or_insert(0) += 1;
            }
        }

        let delay = keyed
            .as_deref()
            .and_then(|k| self.latency.get(k))
            .or_else(|| self.latency.get(op))
            .copied();

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        let failure = keyed
            .as_deref()
            .and_then(|k| self.failures.get_key_value(k))
            .or_else(|| self.failures.get_key_value(op));
        match failure {
            Some((key, (status, message))) => Err(ClientError::ApiError {
                status: *status,
                url: key.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: String) -> ClientError {
    ClientError::NotFound(what)
}

#[async_trait]
impl LookerApi for FakeLooker {
    async fn all_projects(&self) -> Result<Vec<Project>> {
        self.enter("all_projects", None).await?;
        Ok(self.projects.clone())
    }

    async fn project(&self, project_id: &str) -> Result<Project> {
        self.enter("project", Some(project_id)).await?;
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| not_found(format!("project {project_id}")))
    }

    async fn all_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        self.enter("all_project_files", Some(project_id)).await?;
        let current = self
            .workspaces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .copied()
            .unwrap_or(Workspace::Production);
        self.file_listings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(current);
        Ok(self.project_files.get(project_id).cloned().unwrap_or_default())
    }

    async fn all_git_connection_tests(&self, project_id: &str) -> Result<Vec<GitConnectionTest>> {
        self.enter("all_git_connection_tests", Some(project_id)).await?;
        Ok(self
            .git_tests
            .get(project_id)
            .map(|tests| tests.iter().map(|(t, _)| t.clone()).collect())
            .unwrap_or_default())
    }

    async fn run_git_connection_test(
        &self,
        project_id: &str,
        test_id: &str,
    ) -> Result<GitConnectionTestResult> {
        self.enter("run_git_connection_test", Some(&format!("{project_id}/{test_id}")))
            .await?;
        self.git_tests
            .get(project_id)
            .and_then(|tests| tests.iter().find(|(t, _)| t.id == test_id))
            .map(|(_, result)| result.clone())
            .ok_or_else(|| not_found(format!("git test {project_id}/{test_id}")))
    }

    async fn update_session_workspace(&self, workspace: Workspace) -> Result<()> {
        self.enter("update_session_workspace", Some(workspace.as_str()))
            .await?;
        self.workspaces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(workspace);
        Ok(())
    }

    async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>> {
        self.enter("all_lookml_models", None).await?;
        Ok(self.models.clone())
    }

    async fn lookml_model(&self, model: &str) -> Result<LookmlModel> {
        self.enter("lookml_model", Some(model)).await?;
        self.models
            .iter()
            .find(|m| m.name == model)
            .cloned()
            .ok_or_else(|| not_found(format!("model {model}")))
    }

    async fn lookml_model_explore(&self, model: &str, explore: &str) -> Result<LookmlModelExplore> {
        self.enter("lookml_model_explore", Some(&format!("{model}::{explore}")))
            .await?;
        self.explores
            .get(&(model.to_string(), explore.to_string()))
            .cloned()
            .ok_or_else(|| not_found(format!("explore {model}::{explore}")))
    }

    async fn run_inline_query(&self, query: &WriteQuery) -> Result<Vec<Value>> {
        self.enter("run_inline_query", Some(&query.view)).await?;
        Ok(self
            .queries
            .iter()
            .find(|(matcher, _)| matcher(query))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }

    async fn all_connections(&self) -> Result<Vec<DbConnection>> {
        self.enter("all_connections", None).await?;
        Ok(self.connections.clone())
    }

    async fn test_connection(
        &self,
        connection: &str,
        _tests: &[String],
    ) -> Result<Vec<DbConnectionTestResult>> {
        self.enter("test_connection", Some(connection)).await?;
        Ok(self
            .connection_results
            .get(connection)
            .cloned()
            .unwrap_or_default())
    }

    async fn all_legacy_features(&self) -> Result<Vec<LegacyFeature>> {
        self.enter("all_legacy_features", None).await?;
        Ok(self.legacy_features.clone())
    }
}

pub fn project(id: &str, git_remote_url: &str) -> Project {
    Project {
        id: id.to_string(),
        name: id.to_string(),
        git_remote_url: Some(git_remote_url.to_string()),
        pull_request_mode: PullRequestMode::Off,
        validation_required: false,
    }
}

pub fn project_file(id: &str, file_type: &str) -> ProjectFile {
    ProjectFile {
        id: id.to_string(),
        path: Some(id.to_string()),
        title: None,
        file_type: Some(file_type.to_string()),
    }
}

pub fn model(name: &str, project: &str, explores: &[&str]) -> LookmlModel {
    LookmlModel {
        name: name.to_string(),
        project_name: Some(project.to_string()),
        label: None,
        explores: explores
            .iter()
            .map(|e| LookmlModelNavExplore {
                name: e.to_string(),
                label: None,
                description: None,
                hidden: false,
            })
            .collect(),
    }
}

/// An explore with visible `fields` and the given joins.
pub fn explore(model: &str, name: &str, fields: &[&str], joins: &[&str]) -> LookmlModelExplore {
    let field = |f: &&str| LookmlModelExploreField {
        name: f.to_string(),
        hidden: false,
        view: f.split_once('.').map(|(view, _)| view.to_string()),
    };
    LookmlModelExplore {
        id: Some(format!("{model}::{name}")),
        name: name.to_string(),
        model_name: model.to_string(),
        view_name: None,
        description: None,
        hidden: false,
        fields: LookmlModelExploreFieldset {
            dimensions: fields.iter().map(field).collect(),
            measures: Vec::new(),
        },
        joins: joins
            .iter()
            .map(|j| LookmlModelExploreJoin { name: j.to_string() })
            .collect(),
    }
}

pub fn connection(name: &str) -> DbConnection {
    DbConnection {
        name: name.to_string(),
        dialect: Some(Dialect {
            name: Some("postgres".to_string()),
            connection_tests: vec!["connect".to_string(), "query".to_string()],
        }),
        host: None,
    }
}

pub fn connection_result(status: &str, message: &str) -> DbConnectionTestResult {
    DbConnectionTestResult {
        name: Some("connect".to_string()),
        connection_string: None,
        message: Some(message.to_string()),
        status: status.to_string(),
    }
}
