//! Usage queries against the instance's own query history.

use henry_client::WriteQuery;
use henry_config::constants::{DEFAULT_HISTORY_ROW_LIMIT, DEFAULT_MIN_QUERIES, DEFAULT_TIMEFRAME_DAYS};

/// System model exposing instance activity.
pub const SYSTEM_MODEL: &str = "i__looker";
pub const HISTORY_VIEW: &str = "history";

/// Models never reported as user models.
const EXCLUDED_MODELS: &str = "-system^_^_activity, -i^_^_looker";

/// The lookback window and activity threshold of usage queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub timeframe_days: u32,
    pub min_queries: u64,
}

impl Default for UsageWindow {
    fn default() -> Self {
        Self {
            timeframe_days: DEFAULT_TIMEFRAME_DAYS,
            min_queries: DEFAULT_MIN_QUERIES,
        }
    }
}

impl UsageWindow {
    pub fn new(timeframe_days: u32, min_queries: u64) -> Self {
        Self {
            timeframe_days,
            min_queries,
        }
    }

    /// History query with the window filters applied.
    fn base_query(&self) -> WriteQuery {
        WriteQuery::new(SYSTEM_MODEL, HISTORY_VIEW)
            .filter("history.created_date", format!("{} days", self.timeframe_days))
            .filter("history.query_run_count", format!(">={}", self.min_queries))
            .filter("user.dev_branch_name", "NULL")
            .limit(DEFAULT_HISTORY_ROW_LIMIT)
    }

    /// Run counts per model.
    pub fn used_models_query(&self) -> WriteQuery {
        self.base_query()
            .fields(["query.model", "history.query_run_count"])
            .filter("query.model", EXCLUDED_MODELS)
    }

    /// Run counts per explore of `model`, optionally narrowed to one explore.
    pub fn used_explores_query(&self, model: &str, explore: Option<&str>) -> WriteQuery {
        let query = self
            .base_query()
            .fields(["query.view", "history.query_run_count"])
            .filter("query.model", escape(model));
        match explore {
            Some(explore) => query.filter("query.view", escape(explore)),
            None => query,
        }
    }

    /// Formatted fields and filters of every query run against an explore.
    pub fn field_usage_query(&self, model: &str, explore: &str) -> WriteQuery {
        self.base_query()
            .fields([
                "query.model",
                "query.view",
                "query.formatted_fields",
                "query.formatted_filters",
                "history.query_run_count",
            ])
            .filter("query.model", escape(model))
            .filter("query.view", escape(explore))
    }
}

/// Escape `_` for Looker filter expressions.
pub fn escape(name: &str) -> String {
    name.replace('_', "^_")
}
