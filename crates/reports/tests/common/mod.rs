#![allow(dead_code)]

use std::sync::Arc;

pub use henry_client::WriteQuery;
pub use henry_reports::testing::{self, FakeLooker};
pub use henry_reports::{Cell, ReportContext, ReportError, ResolvedRecord, UsageWindow};
pub use serde_json::json;

pub fn context(fake: FakeLooker, workers: usize) -> (Arc<FakeLooker>, ReportContext) {
    let fake = Arc::new(fake);
    let ctx = ReportContext::new(fake.clone(), workers, UsageWindow::default())
        .expect("valid worker count");
    (fake, ctx)
}

pub fn is_used_models(q: &WriteQuery) -> bool {
    q.fields == ["query.model", "history.query_run_count"]
}

pub fn is_used_explores(model: &'static str) -> impl Fn(&WriteQuery) -> bool + Send + Sync {
    move |q| {
        q.fields.first().map(String::as_str) == Some("query.view")
            && q.filters.get("query.model").map(String::as_str) == Some(model)
    }
}

pub fn is_field_usage(explore: &'static str) -> impl Fn(&WriteQuery) -> bool + Send + Sync {
    move |q| {
        q.fields.iter().any(|f| f == "query.formatted_fields")
            && q.filters.get("query.view").map(String::as_str) == Some(explore)
    }
}

pub fn cell<'a>(record: &'a ResolvedRecord, column: &str) -> &'a Cell {
    record
        .get(column)
        .unwrap_or_else(|| panic!("missing column {column}"))
}

pub fn column(records: &[ResolvedRecord], name: &str) -> Vec<Cell> {
    records.iter().map(|r| cell(r, name).clone()).collect()
}
