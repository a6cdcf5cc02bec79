//! The built-in pulse checks.

use futures::FutureExt;
use henry_client::{DbConnectionTestResult, WriteQuery};
use serde_json::Value;

use crate::barrier::Batch;
use crate::derive::{self, RUN_COUNT_FIELD};
use crate::error::TaskError;
use crate::pool::TaskPool;
use crate::record::{Cell, Record, ResolvedRecord, resolve_all};
use crate::usage::{HISTORY_VIEW, SYSTEM_MODEL};

use super::registry::{CheckContext, CheckFuture, CheckSection};

pub const DB_CONNECTIONS_TITLE: &str = "Checking connections";
pub const DASHBOARD_PERFORMANCE_TITLE: &str =
    "Checking for dashboards with queries slower than 30 seconds in the last 7 days";
pub const DASHBOARD_ERRORS_TITLE: &str =
    "Checking for dashboards with erroring queries in the last 7 days";
pub const EXPLORE_PERFORMANCE_TITLE: &str = "Checking for the slowest explores in the past 7 days";
pub const SCHEDULE_FAILURES_TITLE: &str = "Checking for failing schedules";
pub const LEGACY_FEATURES_TITLE: &str = "Checking for enabled legacy features";

/// Connections owned by Looker itself.
const RESERVED_CONNECTIONS: [&str; 3] = ["looker__internal__analytics", "looker", "looker__ilooker"];

const LAST_WEEK: &str = "7 days";

fn history_query() -> WriteQuery {
    WriteQuery::new(SYSTEM_MODEL, HISTORY_VIEW)
}

async fn rows_of(cx: &CheckContext, query: &WriteQuery) -> Result<Vec<ResolvedRecord>, TaskError> {
    let rows = cx.api.run_inline_query(query).await?;
    Ok(rows.iter().map(ResolvedRecord::from_json_row).collect())
}

/// Test every user connection and count the queries it served.
pub fn db_connections(cx: CheckContext) -> CheckFuture {
    async move {
        let connections: Vec<_> = cx
            .api
            .all_connections()
            .await?
            .into_iter()
            .filter(|c| !RESERVED_CONNECTIONS.contains(&c.name.as_str()))
            .collect();
        if connections.is_empty() {
            return Err(TaskError::Failed("No connections found.".to_string()));
        }

        // A pool of its own: this check already holds a slot of the caller's.
        let pool = TaskPool::new(cx.workers)?;
        let mut batch = Batch::new();
        let mut records = Vec::with_capacity(connections.len());

        for connection in connections {
            let mut record = Record::new();
            record.set("Connection", connection.name.clone());

            let api = cx.api.clone();
            let name = connection.name.clone();
            let tests = connection.supported_tests().to_vec();
            let results = pool.submit(&mut batch, format!("test connection {name}"), async move {
                api.test_connection(&name, &tests).await
            });
            record.defer("Status", results, |results: Vec<DbConnectionTestResult>| {
                Ok(Cell::Text(derive::collapse_status(
                    &results,
                    DbConnectionTestResult::is_error,
                    |r| r.message.clone().unwrap_or_default(),
                )))
            });

            let api = cx.api.clone();
            let query = history_query()
                .fields([RUN_COUNT_FIELD])
                .filter("history.connection_name", connection.name.clone())
                .limit(1);
            let count = pool.submit(
                &mut batch,
                format!("query count {}", connection.name),
                async move { api.run_inline_query(&query).await },
            );
            record.defer("Query Count", count, |rows: Vec<Value>| {
                Ok(rows
                    .first()
                    .and_then(|row| row.get(RUN_COUNT_FIELD))
                    .map(Cell::from_json)
                    .unwrap_or(Cell::Int(0)))
            });
            records.push(record);
        }

        batch.await_all().await;
        Ok(CheckSection {
            title: DB_CONNECTIONS_TITLE.to_string(),
            rows: resolve_all(records)?,
        })
    }
    .boxed()
}

pub fn dashboard_performance(cx: CheckContext) -> CheckFuture {
    async move {
        let query = history_query()
            .fields(["dashboard.title", "query.count"])
            .filter("history.created_date", LAST_WEEK)
            .filter("history.real_dash_id", "-NULL")
            .filter("history.runtime", ">30")
            .filter("history.status", "complete")
            .sort("query.count desc")
            .limit(20);
        Ok(CheckSection {
            title: DASHBOARD_PERFORMANCE_TITLE.to_string(),
            rows: rows_of(&cx, &query).await?,
        })
    }
    .boxed()
}

pub fn dashboard_errors(cx: CheckContext) -> CheckFuture {
    async move {
        let query = history_query()
            .fields(["dashboard.title", RUN_COUNT_FIELD])
            .filter("dashboard.title", "-NULL")
            .filter("history.created_date", LAST_WEEK)
            .filter("history.dashboard_session", "-NULL")
            .filter("history.status", "error")
            .sort("history.query_run_count desc")
            .limit(20);
        Ok(CheckSection {
            title: DASHBOARD_ERRORS_TITLE.to_string(),
            rows: rows_of(&cx, &query).await?,
        })
    }
    .boxed()
}

pub fn explore_performance(cx: CheckContext) -> CheckFuture {
    async move {
        let query = history_query()
            .fields(["query.model", "query.view", "history.average_runtime"])
            .filter("history.created_date", LAST_WEEK)
            .filter("query.model", "-NULL, -system^_^_activity")
            .sort("history.average_runtime desc")
            .limit(20);
        let rows = rows_of(&cx, &query).await?;

        let average = query.clone().fields(["history.average_runtime"]);
        let title = match cx.api.run_inline_query(&average).await {
            Ok(rows) => match rows
                .first()
                .and_then(|r| r.get("history.average_runtime"))
                .and_then(Value::as_f64)
            {
                Some(avg) if avg != 0.0 => format!(
                    "{EXPLORE_PERFORMANCE_TITLE}\nFor context, the average query runtime is {avg:.4}s"
                ),
                _ => EXPLORE_PERFORMANCE_TITLE.to_string(),
            },
            Err(err) => {
                tracing::debug!(error = %err, "average runtime unavailable");
                EXPLORE_PERFORMANCE_TITLE.to_string()
            }
        };
        Ok(CheckSection { title, rows })
    }
    .boxed()
}

pub fn schedule_failures(cx: CheckContext) -> CheckFuture {
    async move {
        let query = WriteQuery::new(SYSTEM_MODEL, "scheduled_plan")
            .fields(["scheduled_job.name", "scheduled_job.count"])
            .filter("scheduled_job.created_date", LAST_WEEK)
            .filter("scheduled_job.status", "failure")
            .sort("scheduled_job.count desc")
            .limit(500);
        Ok(CheckSection {
            title: SCHEDULE_FAILURES_TITLE.to_string(),
            rows: rows_of(&cx, &query).await?,
        })
    }
    .boxed()
}

pub fn legacy_features(cx: CheckContext) -> CheckFuture {
    async move {
        let rows = cx
            .api
            .all_legacy_features()
            .await?
            .into_iter()
            .filter(|f| f.enabled)
            .map(|f| ResolvedRecord::from_pairs([("Feature", Cell::Text(f.name.unwrap_or(f.id)))]))
            .collect();
        Ok(CheckSection {
            title: LEGACY_FEATURES_TITLE.to_string(),
            rows,
        })
    }
    .boxed()
}
