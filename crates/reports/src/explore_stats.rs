//! Field and join statistics for explores.
//!
//! Field statistics are gathered in their own batch before the per-explore
//! fan-out, because the join statistics task consumes them.

use std::collections::BTreeMap;

use henry_client::LookmlModelExplore;

use crate::barrier::Batch;
use crate::context::{ReportContext, Usage};
use crate::derive;
use crate::error::{ReportError, TaskError};
use crate::pool::TaskHandle;
use crate::record::{Cell, Record};
use crate::subjects::{ExploreSubject, UnavailableExplore};

#[derive(Debug)]
pub(crate) struct ExploreStats {
    pub explore: LookmlModelExplore,
    /// Usage per visible field, or why it could not be fetched.
    pub fields: Result<BTreeMap<String, u64>, String>,
}

/// Gather field statistics for every available explore. Unavailable
/// explores pass through in place.
pub(crate) async fn collect(
    ctx: &ReportContext,
    explores: Vec<ExploreSubject>,
) -> Result<Vec<Result<ExploreStats, UnavailableExplore>>, ReportError> {
    let mut batch = Batch::new();
    let pending: Vec<_> = explores
        .into_iter()
        .map(|subject| {
            subject.map(|explore| {
                let handle = ctx.spawn_field_usage_rows(&mut batch, &explore);
                (explore, handle)
            })
        })
        .collect();
    tracing::debug!(explores = pending.iter().flatten().count(), "fetching field usage");
    batch.await_all().await;

    pending
        .into_iter()
        .map(|subject| {
            let (explore, handle) = match subject {
                Ok(pending) => pending,
                Err(unavailable) => return Ok(Err(unavailable)),
            };
            let fields = match handle.resolve()? {
                Ok(rows) => {
                    let usage = derive::field_usage(&rows)?;
                    Ok(derive::field_stats(&explore.visible_field_names(), &usage))
                }
                Err(err) => Err(err.to_string()),
            };
            Ok(Ok(ExploreStats { explore, fields }))
        })
        .collect()
}

/// A row for an explore whose definition is unavailable: the names from the
/// navigation entry, and the fetch error in every other column.
pub(crate) fn unavailable_record(unavailable: &UnavailableExplore, columns: &[&str]) -> Record {
    let mut record = Record::new();
    record.set("Model", unavailable.model.clone());
    record.set("Explore", unavailable.name.clone());
    for column in columns {
        record.set(*column, Cell::Error(unavailable.message.clone()));
    }
    record
}

/// Submit the join statistics of one explore; `None` when its field
/// statistics are unavailable.
pub(crate) fn spawn_join_stats(
    ctx: &ReportContext,
    batch: &mut Batch,
    stats: &ExploreStats,
) -> Option<TaskHandle<Usage>> {
    let fields = stats.fields.as_ref().ok()?.clone();
    let joins = stats.explore.joins.clone();
    let base_view = stats.explore.base_view().to_string();
    Some(ctx.pool().submit(
        batch,
        format!("join stats {}::{}", stats.explore.model_name, stats.explore.name),
        async move { Ok::<_, TaskError>(derive::join_stats(&joins, &base_view, &fields)) },
    ))
}
