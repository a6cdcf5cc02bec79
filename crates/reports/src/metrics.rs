//! Metrics for the report engine.
//!
//! Pool tasks, pulse checks and whole reports are timed through the
//! `metrics` facade, labelled with the worker count so runs at different
//! `--threads` settings can be compared. Recording is a no-op without an
//! installed recorder.

use std::time::Duration;

/// Time a task spent waiting for a pool permit.
pub const METRIC_TASK_WAIT: &str = "henry_pool_task_wait_seconds";

/// Time a task spent running once it held a permit.
pub const METRIC_TASK_DURATION: &str = "henry_pool_task_duration_seconds";

/// Wall time of one pulse check, from submission to result.
pub const METRIC_CHECK_DURATION: &str = "henry_pulse_check_duration_seconds";

/// Wall time of one report invocation.
pub const METRIC_REPORT_DURATION: &str = "henry_report_duration_seconds";

/// Outcome label of a finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
    Panic,
}

impl Outcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
            Outcome::Panic => "panic",
        }
    }
}

pub(crate) fn record_task_wait(workers: usize, waited: Duration) {
    metrics::histogram!(METRIC_TASK_WAIT, "workers" => workers.to_string())
        .record(waited.as_secs_f64());
}

pub(crate) fn record_task(workers: usize, outcome: Outcome, ran: Duration) {
    metrics::histogram!(METRIC_TASK_DURATION,
        "workers" => workers.to_string(),
        "outcome" => outcome.as_str(),
    )
    .record(ran.as_secs_f64());
}

pub(crate) fn record_check(check: &'static str, outcome: Outcome, elapsed: Duration) {
    metrics::histogram!(METRIC_CHECK_DURATION,
        "check" => check,
        "outcome" => outcome.as_str(),
    )
    .record(elapsed.as_secs_f64());
}

/// Record the wall time of a report, e.g. `"vacuum explores"`.
pub fn record_report(report: &'static str, workers: usize, outcome: Outcome, elapsed: Duration) {
    metrics::histogram!(METRIC_REPORT_DURATION,
        "report" => report,
        "workers" => workers.to_string(),
        "outcome" => outcome.as_str(),
    )
    .record(elapsed.as_secs_f64());
}
