//! The explicit list of pulse checks.

use std::sync::Arc;

use futures::future::BoxFuture;
use henry_client::LookerApi;

use crate::error::TaskError;
use crate::record::ResolvedRecord;

use super::checks;

/// What a check needs to run.
#[derive(Clone)]
pub struct CheckContext {
    pub api: Arc<dyn LookerApi>,
    /// Size of any pool the check creates for its own fan-out.
    pub workers: usize,
}

/// A successful check: its heading and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSection {
    pub title: String,
    pub rows: Vec<ResolvedRecord>,
}

pub type CheckFuture = BoxFuture<'static, Result<CheckSection, TaskError>>;

#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    /// Heading used when the check fails before producing its own.
    pub title: &'static str,
    pub run: fn(CheckContext) -> CheckFuture,
}

#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: Vec<Check>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six built-in checks, in reporting order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(Check {
                name: "db_connections",
                title: checks::DB_CONNECTIONS_TITLE,
                run: checks::db_connections,
            })
            .register(Check {
                name: "dashboard_performance",
                title: checks::DASHBOARD_PERFORMANCE_TITLE,
                run: checks::dashboard_performance,
            })
            .register(Check {
                name: "dashboard_errors",
                title: checks::DASHBOARD_ERRORS_TITLE,
                run: checks::dashboard_errors,
            })
            .register(Check {
                name: "explore_performance",
                title: checks::EXPLORE_PERFORMANCE_TITLE,
                run: checks::explore_performance,
            })
            .register(Check {
                name: "schedule_failures",
                title: checks::SCHEDULE_FAILURES_TITLE,
                run: checks::schedule_failures,
            })
            .register(Check {
                name: "legacy_features",
                title: checks::LEGACY_FEATURES_TITLE,
                run: checks::legacy_features,
            });
        registry
    }

    pub fn register(&mut self, check: Check) -> &mut Self {
        self.checks.push(check);
        self
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        assert_eq!(
            CheckRegistry::standard().names(),
            vec![
                "db_connections",
                "dashboard_performance",
                "dashboard_errors",
                "explore_performance",
                "schedule_failures",
                "legacy_features",
            ]
        );
    }
}
