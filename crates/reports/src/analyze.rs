//! `analyze` reports: per-subject health and utilization.

use std::sync::Arc;

use henry_client::ProjectFile;
use tracing::info;

use crate::barrier::Batch;
use crate::context::{ReportContext, Usage};
use crate::derive;
use crate::error::ReportError;
use crate::explore_stats;
use crate::record::{Cell, Record, ResolvedRecord, resolve_all};
use crate::subjects;

/// Git status of projects hosted by Looker itself.
pub const BARE_REPO_STATUS: &str = "Bare repo, no tests required";

pub async fn projects(
    ctx: &ReportContext,
    project: Option<&str>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    info!(project = ?project, "analyzing projects");
    let projects = subjects::projects(ctx.api().as_ref(), project).await?;

    // Git tests switch the shared session to the dev workspace, so every file
    // listing completes before the first of them starts.
    let mut listing = Batch::new();
    let files: Vec<_> = projects
        .iter()
        .map(|p| {
            let api = Arc::clone(ctx.api());
            let project_id = p.id.clone();
            ctx.pool()
                .submit(&mut listing, format!("files {}", p.id), async move {
                    api.all_project_files(&project_id).await
                })
        })
        .collect();
    listing.await_all().await;

    let mut batch = Batch::new();
    let mut records = Vec::with_capacity(projects.len());
    for (p, files) in projects.into_iter().zip(files) {
        let mut record = Record::new();
        record.set("Project", p.name.clone());

        if p.is_bare_repo() {
            record.set("Git Connection Status", BARE_REPO_STATUS);
        } else {
            let tests = ctx.spawn_git_connection_tests(&mut batch, &p.id);
            record.defer("Git Connection Status", tests, |status| Ok(Cell::Text(status)));
        }

        record.set("PR Mode", p.pull_request_mode.as_str());
        record.set("Is Validation Required", p.validation_required);
        record.defer_many(
            vec!["# Models".to_string(), "# View Files".to_string()],
            files,
            |files: Vec<ProjectFile>| {
                Ok(vec![
                    Cell::count(derive::count_matching(&files, |f| f.is_type("model"))),
                    Cell::count(derive::count_matching(&files, |f| f.is_type("view"))),
                ])
            },
        );
        records.push(record);
    }

    batch.await_all().await;
    resolve_all(records)
}

pub async fn models(
    ctx: &ReportContext,
    project: Option<&str>,
    model: Option<&str>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    info!(project = ?project, model = ?model, "analyzing models");
    let models = subjects::models(ctx.api().as_ref(), project, model).await?;

    let mut batch = Batch::new();
    let mut records = Vec::with_capacity(models.len());
    for m in models {
        let explore_names: Vec<String> = m.explores.iter().map(|e| e.name.clone()).collect();

        let mut record = Record::new();
        record.set("Project", m.project_name.clone().unwrap_or_default());
        record.set("Model", m.name.clone());
        record.set("# Explores", Cell::count(derive::count(&explore_names)));

        let unused = ctx.spawn_unused_explores(&mut batch, &m.name, explore_names);
        record.defer("# Unused Explores", unused, |unused: Vec<String>| {
            Ok(Cell::count(unused.len()))
        });

        // Identical query per model; the client cache collapses the repeats.
        let used = ctx.spawn_used_models(&mut batch);
        let name = m.name.clone();
        record.defer("Query Count", used, move |usage: Usage| {
            Ok(Cell::uint(derive::lookup_or_zero(&usage, &name)))
        });
        records.push(record);
    }

    batch.await_all().await;
    resolve_all(records)
}

const EXPLORE_STAT_COLUMNS: [&str; 7] = [
    "Is Hidden",
    "Has Description",
    "# Fields",
    "# Unused Fields",
    "# Joins",
    "# Unused Joins",
    "Query Count",
];

pub async fn explores(
    ctx: &ReportContext,
    model: Option<&str>,
    explore: Option<&str>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    info!(model = ?model, explore = ?explore, "analyzing explores");
    let explores = subjects::explores(Arc::clone(ctx.api()), ctx.pool(), model, explore).await?;
    let stats = explore_stats::collect(ctx, explores).await?;

    let mut batch = Batch::new();
    let mut records = Vec::with_capacity(stats.len());
    for s in &stats {
        let s = match s {
            Ok(s) => s,
            Err(unavailable) => {
                records.push(explore_stats::unavailable_record(unavailable, &EXPLORE_STAT_COLUMNS));
                continue;
            }
        };
        let e = &s.explore;
        let mut record = Record::new();
        record.set("Model", e.model_name.clone());
        record.set("Explore", e.name.clone());
        record.set("Is Hidden", e.hidden);
        record.set("Has Description", derive::has_text(e.description.as_deref()));

        match &s.fields {
            Ok(fields) => {
                record.set("# Fields", Cell::count(fields.len()));
                record.set("# Unused Fields", Cell::count(derive::unused(fields).len()));
            }
            Err(msg) => {
                record.set("# Fields", Cell::count(e.visible_field_names().len()));
                record.set("# Unused Fields", Cell::Error(msg.clone()));
            }
        }

        let join_columns = vec!["# Joins".to_string(), "# Unused Joins".to_string()];
        match explore_stats::spawn_join_stats(ctx, &mut batch, s) {
            Some(joins) => {
                record.defer_many(join_columns, joins, |joins: Usage| {
                    Ok(vec![
                        Cell::count(joins.len()),
                        Cell::count(derive::unused(&joins).len()),
                    ])
                });
            }
            None => {
                let msg = s.fields.as_ref().err().cloned().unwrap_or_default();
                for column in join_columns {
                    record.set(column, Cell::Error(msg.clone()));
                }
            }
        }

        let used = ctx.spawn_used_explores(&mut batch, &e.model_name, Some(&e.name));
        let name = e.name.clone();
        record.defer("Query Count", used, move |usage: Usage| {
            Ok(Cell::uint(derive::lookup_or_zero(&usage, &name)))
        });
        records.push(record);
    }

    batch.await_all().await;
    resolve_all(records)
}
