//! `pulse`: instance health checks.
//!
//! Every registered check runs as one unit on the pool. Reports are handed to
//! the caller's sink as each check finishes, so emission follows completion
//! order rather than registration order. A failing check produces a failed
//! report; it never stops the others.

mod checks;
mod registry;

use std::time::Instant;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::Serialize;
use tracing::{info, warn};

use crate::barrier::Batch;
use crate::context::ReportContext;
use crate::metrics::{self, Outcome};
use crate::record::ResolvedRecord;

pub use checks::{
    DASHBOARD_ERRORS_TITLE, DASHBOARD_PERFORMANCE_TITLE, DB_CONNECTIONS_TITLE,
    EXPLORE_PERFORMANCE_TITLE, LEGACY_FEATURES_TITLE, SCHEDULE_FAILURES_TITLE,
};
pub use registry::{Check, CheckContext, CheckFuture, CheckRegistry, CheckSection};

/// Outcome of one check as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub title: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Rows(Vec<ResolvedRecord>),
    Error(String),
}

impl CheckReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Error(_))
    }
}

/// Run every check in `registry`, emitting each report once as it completes.
///
/// Returns the number of reports emitted, which always equals the number of
/// registered checks.
pub async fn run_all<F>(ctx: &ReportContext, registry: &CheckRegistry, mut sink: F) -> usize
where
    F: FnMut(CheckReport),
{
    info!(checks = registry.len(), "running pulse checks");
    let mut batch = Batch::new();
    let mut pending = FuturesUnordered::new();

    for check in registry.checks() {
        let cx = CheckContext {
            api: ctx.api().clone(),
            workers: ctx.pool().workers(),
        };
        let started = Instant::now();
        let handle = ctx.pool().submit(&mut batch, check.name, (check.run)(cx));
        let (name, title) = (check.name, check.title);
        pending.push(async move {
            let result = handle.join().await;
            let outcome = if result.is_ok() { Outcome::Ok } else { Outcome::Error };
            metrics::record_check(name, outcome, started.elapsed());
            (name, title, result)
        });
    }

    let mut emitted = 0;
    while let Some((name, title, result)) = pending.next().await {
        let report = match result {
            Ok(section) => CheckReport {
                name: name.to_string(),
                title: section.title,
                outcome: CheckOutcome::Rows(section.rows),
            },
            Err(err) => {
                warn!(check = name, error = %err, "check failed");
                CheckReport {
                    name: name.to_string(),
                    title: title.to_string(),
                    outcome: CheckOutcome::Error(err.to_string()),
                }
            }
        };
        sink(report);
        emitted += 1;
    }

    batch.await_all().await;
    emitted
}
