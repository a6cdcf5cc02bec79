//! Subject enumeration: the projects, models and explores a report covers.
//!
//! A failed listing aborts the report before fan-out, as does an empty list.
//! Per-explore definition fetches fail per subject.

use std::sync::Arc;

use henry_client::{LookerApi, LookmlModel, LookmlModelExplore, Project};
use tracing::{debug, warn};

use crate::barrier::Batch;
use crate::error::ReportError;
use crate::pool::TaskPool;

pub async fn projects(
    api: &dyn LookerApi,
    project: Option<&str>,
) -> Result<Vec<Project>, ReportError> {
    let projects = match project {
        Some(id) => vec![
            api.project(id)
                .await
                .map_err(|e| ReportError::enumeration(format!("failed to fetch project '{id}'"), e))?,
        ],
        None => api
            .all_projects()
            .await
            .map_err(|e| ReportError::enumeration("failed to list projects", e))?,
    };

    if projects.is_empty() {
        return Err(ReportError::NotFound("No projects found.".to_string()));
    }
    debug!(count = projects.len(), "enumerated projects");
    Ok(projects)
}

pub async fn models(
    api: &dyn LookerApi,
    project: Option<&str>,
    model: Option<&str>,
) -> Result<Vec<LookmlModel>, ReportError> {
    let mut models = match model {
        Some(name) => vec![
            api.lookml_model(name)
                .await
                .map_err(|e| ReportError::enumeration(format!("failed to fetch model '{name}'"), e))?,
        ],
        None => api
            .all_lookml_models()
            .await
            .map_err(|e| ReportError::enumeration("failed to list models", e))?,
    };

    if let Some(project) = project {
        models.retain(|m| m.project_name.as_deref() == Some(project));
    }

    if models.is_empty() {
        return Err(ReportError::NotFound("No models found.".to_string()));
    }
    debug!(count = models.len(), "enumerated models");
    Ok(models)
}

/// An explore whose definition could not be fetched.
///
/// Only the names from the model's navigation entry are known; the report
/// still emits a row for it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnavailableExplore {
    pub model: String,
    pub name: String,
    pub message: String,
}

/// One explore subject: its full definition, or why that fetch failed.
pub type ExploreSubject = Result<LookmlModelExplore, UnavailableExplore>;

/// Fetch full explore definitions, one pool task per explore.
///
/// Only the model listing is fatal. A failed definition fetch stays with its
/// own subject, in navigation order.
pub async fn explores(
    api: Arc<dyn LookerApi>,
    pool: &TaskPool,
    model: Option<&str>,
    explore: Option<&str>,
) -> Result<Vec<ExploreSubject>, ReportError> {
    let models = models(api.as_ref(), None, model).await?;

    let mut batch = Batch::new();
    let mut handles = Vec::new();
    for m in &models {
        for nav in m.explores.iter().filter(|e| explore.is_none_or(|want| e.name == want)) {
            let api = Arc::clone(&api);
            let model_name = m.name.clone();
            let explore_name = nav.name.clone();
            let handle = pool.submit(
                &mut batch,
                format!("explore {}::{}", m.name, nav.name),
                async move { api.lookml_model_explore(&model_name, &explore_name).await },
            );
            handles.push((m.name.clone(), nav.name.clone(), handle));
        }
    }
    batch.await_all().await;

    if handles.is_empty() {
        return Err(ReportError::NotFound("No explores found.".to_string()));
    }

    let mut explores = Vec::with_capacity(handles.len());
    for (model, name, handle) in handles {
        match handle.resolve()? {
            Ok(explore) => explores.push(Ok(explore)),
            Err(err) => {
                warn!(model = %model, explore = %name, error = %err, "explore definition unavailable");
                explores.push(Err(UnavailableExplore {
                    model,
                    name,
                    message: err.to_string(),
                }));
            }
        }
    }
    debug!(count = explores.len(), "enumerated explores");
    Ok(explores)
}
