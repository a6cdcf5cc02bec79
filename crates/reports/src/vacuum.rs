//! `vacuum` reports: LookML that nobody uses.

use std::sync::Arc;

use tracing::info;

use crate::barrier::Batch;
use crate::context::{ReportContext, Usage};
use crate::derive;
use crate::error::{ReportError, TaskError};
use crate::explore_stats;
use crate::record::{Cell, Record, ResolvedRecord, resolve_all};
use crate::subjects;

pub async fn models(
    ctx: &ReportContext,
    project: Option<&str>,
    model: Option<&str>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    info!(project = ?project, model = ?model, "vacuuming models");

    // Enumeration and the usage query run side by side.
    let mut batch = Batch::new();
    let used = ctx.spawn_used_models(&mut batch);
    let api = Arc::clone(ctx.api());
    let (project_filter, model_filter) = (project.map(str::to_owned), model.map(str::to_owned));
    let enumerated = ctx.pool().submit(&mut batch, "enumerate models", async move {
        Ok::<_, TaskError>(
            subjects::models(api.as_ref(), project_filter.as_deref(), model_filter.as_deref()).await,
        )
    });
    batch.await_all().await;

    let models = match enumerated.resolve()? {
        Ok(models) => models?,
        Err(err) => return Err(ReportError::Aborted(format!("model enumeration: {err}"))),
    };
    let usage: Result<Usage, String> = used.resolve()?.map_err(|e| e.to_string());

    let mut batch = Batch::new();
    let mut records = Vec::with_capacity(models.len());
    for m in models {
        let explore_names = m.explores.iter().map(|e| e.name.clone()).collect();
        let mut record = Record::new();
        record.set("Model", m.name.clone());
        record.set(
            "Model Query Count",
            match &usage {
                Ok(usage) => Cell::uint(derive::lookup_or_zero(usage, &m.name)),
                Err(msg) => Cell::Error(msg.clone()),
            },
        );

        let unused = ctx.spawn_unused_explores(&mut batch, &m.name, explore_names);
        record.defer("Unused Explores", unused, |unused: Vec<String>| {
            Ok(Cell::Text(derive::join_sorted(&unused)))
        });
        records.push(record);
    }

    batch.await_all().await;
    resolve_all(records)
}

pub async fn explores(
    ctx: &ReportContext,
    model: Option<&str>,
    explore: Option<&str>,
) -> Result<Vec<ResolvedRecord>, ReportError> {
    info!(model = ?model, explore = ?explore, "vacuuming explores");
    let explores = subjects::explores(Arc::clone(ctx.api()), ctx.pool(), model, explore).await?;
    let stats = explore_stats::collect(ctx, explores).await?;

    let mut batch = Batch::new();
    let mut records = Vec::with_capacity(stats.len());
    for s in &stats {
        let s = match s {
            Ok(s) => s,
            Err(unavailable) => {
                records.push(explore_stats::unavailable_record(
                    unavailable,
                    &["Unused Joins", "Unused Fields"],
                ));
                continue;
            }
        };
        let mut record = Record::new();
        record.set("Model", s.explore.model_name.clone());
        record.set("Explore", s.explore.name.clone());

        match explore_stats::spawn_join_stats(ctx, &mut batch, s) {
            Some(joins) => {
                record.defer("Unused Joins", joins, |joins: Usage| {
                    Ok(Cell::Text(derive::join_sorted(&derive::unused(&joins))))
                });
            }
            None => {
                let msg = s.fields.as_ref().err().cloned().unwrap_or_default();
                record.set("Unused Joins", Cell::Error(msg));
            }
        }

        record.set(
            "Unused Fields",
            match &s.fields {
                Ok(fields) => Cell::Text(derive::join_sorted(&derive::unused(fields))),
                Err(msg) => Cell::Error(msg.clone()),
            },
        );
        records.push(record);
    }

    batch.await_all().await;
    resolve_all(records)
}
