//! Shared state of one report invocation and the usage lookups every report
//! family submits to the pool.

use std::collections::BTreeMap;
use std::sync::Arc;

use henry_client::{LookerApi, LookmlModelExplore, Workspace};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::barrier::Batch;
use crate::derive;
use crate::error::{ReportError, TaskError};
use crate::pool::{TaskHandle, TaskPool};
use crate::usage::UsageWindow;

/// Run counts keyed by model or explore name.
pub type Usage = BTreeMap<String, u64>;

#[derive(Clone)]
pub struct ReportContext {
    api: Arc<dyn LookerApi>,
    pool: TaskPool,
    window: UsageWindow,
    /// Serializes dev-workspace sessions; the workspace is per API session.
    dev_session: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ReportContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportContext")
            .field("pool", &self.pool)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl ReportContext {
    pub fn new(api: Arc<dyn LookerApi>, workers: usize, window: UsageWindow) -> Result<Self, ReportError> {
        Ok(Self {
            api,
            pool: TaskPool::new(workers)?,
            window,
            dev_session: Arc::new(Mutex::new(())),
        })
    }

    pub fn api(&self) -> &Arc<dyn LookerApi> {
        &self.api
    }

    pub fn pool(&self) -> &TaskPool {
        &self.pool
    }

    pub(crate) fn spawn_used_models(&self, batch: &mut Batch) -> TaskHandle<Usage> {
        let api = Arc::clone(&self.api);
        let query = self.window.used_models_query();
        self.pool.submit(batch, "used models", async move {
            let rows = api.run_inline_query(&query).await?;
            Ok::<_, TaskError>(derive::parse_usage(&rows, "query.model")?)
        })
    }

    pub(crate) fn spawn_used_explores(
        &self,
        batch: &mut Batch,
        model: &str,
        explore: Option<&str>,
    ) -> TaskHandle<Usage> {
        let api = Arc::clone(&self.api);
        let query = self.window.used_explores_query(model, explore);
        self.pool.submit(batch, format!("used explores {model}"), async move {
            let rows = api.run_inline_query(&query).await?;
            Ok::<_, TaskError>(derive::parse_usage(&rows, "query.view")?)
        })
    }

    /// Explores of `model` with no recorded usage in the window.
    pub(crate) fn spawn_unused_explores(
        &self,
        batch: &mut Batch,
        model: &str,
        explores: Vec<String>,
    ) -> TaskHandle<Vec<String>> {
        let api = Arc::clone(&self.api);
        let query = self.window.used_explores_query(model, None);
        self.pool.submit(batch, format!("unused explores {model}"), async move {
            let rows = api.run_inline_query(&query).await?;
            let used = derive::parse_usage(&rows, "query.view")?;
            Ok::<_, TaskError>(derive::unused_explores(&explores, &used))
        })
    }

    /// Raw history rows describing which fields of an explore were queried.
    pub(crate) fn spawn_field_usage_rows(
        &self,
        batch: &mut Batch,
        explore: &LookmlModelExplore,
    ) -> TaskHandle<Vec<Value>> {
        let api = Arc::clone(&self.api);
        let query = self.window.field_usage_query(&explore.model_name, &explore.name);
        self.pool.submit(
            batch,
            format!("field usage {}::{}", explore.model_name, explore.name),
            async move { api.run_inline_query(&query).await },
        )
    }

    /// Run a project's git connection tests inside the dev workspace.
    pub(crate) fn spawn_git_connection_tests(
        &self,
        batch: &mut Batch,
        project_id: &str,
    ) -> TaskHandle<String> {
        let api = Arc::clone(&self.api);
        let lock = Arc::clone(&self.dev_session);
        let project_id = project_id.to_string();
        self.pool.submit(batch, format!("git tests {project_id}"), async move {
            let _dev = lock.lock().await;
            run_git_connection_tests(api.as_ref(), &project_id).await
        })
    }
}

/// Switch to dev, run tests until the first failure, always switch back.
pub async fn run_git_connection_tests(api: &dyn LookerApi, project_id: &str) -> Result<String, TaskError> {
    api.update_session_workspace(Workspace::Dev).await?;
    let outcome = git_test_status(api, project_id).await;
    let restored = api.update_session_workspace(Workspace::Production).await;
    let status = outcome?;
    restored?;
    Ok(status)
}

async fn git_test_status(api: &dyn LookerApi, project_id: &str) -> Result<String, TaskError> {
    let tests = api.all_git_connection_tests(project_id).await?;
    let mut results = Vec::with_capacity(tests.len());
    for test in &tests {
        let result = api.run_git_connection_test(project_id, &test.id).await?;
        let passed = result.passed();
        results.push(result);
        if !passed {
            break;
        }
    }
    Ok(derive::collapse_status(
        &results,
        |r| !r.passed(),
        |r| r.message.clone().unwrap_or_else(|| r.status.clone()),
    ))
}
