//! Bounded-concurrency task pool.
//!
//! [`TaskPool::submit`] spawns the work on the tokio runtime immediately; a
//! semaphore with `workers` permits bounds how many run at once, the rest
//! wait for a permit. Each submission yields a [`TaskHandle`] written exactly
//! once by its worker (a oneshot channel) and read exactly once by the
//! resolver.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::{Semaphore, oneshot};

use crate::barrier::Batch;
use crate::error::{ReportError, TaskError};
use crate::metrics::{self, Outcome};

/// Outcome of one unit of work.
pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Clone)]
pub struct TaskPool {
    permits: Arc<Semaphore>,
    workers: usize,
}

impl TaskPool {
    /// Create a pool running at most `workers` tasks at once.
    pub fn new(workers: usize) -> Result<Self, ReportError> {
        if workers == 0 {
            return Err(ReportError::InvalidWorkers);
        }
        Ok(Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Submit `work` as part of `batch`.
    ///
    /// `label` names the work in logs and in resolution errors.
    pub fn submit<T, E, F>(&self, batch: &mut Batch, label: impl Into<String>, work: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        E: Into<TaskError> + Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let label = label.into();
        let ticket = batch.register();
        let permits = Arc::clone(&self.permits);
        let (tx, rx) = oneshot::channel();
        let task_label = label.clone();
        let workers = self.workers;
        let submitted = Instant::now();

        tokio::spawn(async move {
            // Declared first so it is released after the result is sent.
            let _ticket = ticket;
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => {
                    metrics::record_task_wait(workers, submitted.elapsed());
                    let started = Instant::now();
                    let outcome = match AssertUnwindSafe(work).catch_unwind().await {
                        Ok(result) => result.map_err(Into::into),
                        Err(panic) => Err(TaskError::Panicked(panic_message(panic.as_ref()))),
                    };
                    let kind = match &outcome {
                        Ok(_) => Outcome::Ok,
                        Err(TaskError::Panicked(_)) => Outcome::Panic,
                        Err(_) => Outcome::Error,
                    };
                    metrics::record_task(workers, kind, started.elapsed());
                    outcome
                }
                Err(_) => Err(TaskError::Failed("task pool closed".to_string())),
            };
            if let Err(err) = &outcome {
                tracing::warn!(task = %task_label, error = %err, "task failed");
            }
            let _ = tx.send(outcome);
        });

        TaskHandle { label, rx }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Result slot for one submitted unit of work.
#[derive(Debug)]
pub struct TaskHandle<T> {
    label: String,
    rx: oneshot::Receiver<TaskResult<T>>,
}

impl<T> TaskHandle<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Take the completed result without waiting.
    ///
    /// Only valid after the owning batch has been awaited; a handle that is
    /// still pending is [`ReportError::Unresolved`].
    pub fn resolve(mut self) -> Result<TaskResult<T>, ReportError> {
        match self.rx.try_recv() {
            Ok(result) => Ok(result),
            Err(oneshot::error::TryRecvError::Empty) => Err(ReportError::Unresolved(self.label)),
            Err(oneshot::error::TryRecvError::Closed) => Ok(Err(TaskError::Panicked(format!(
                "worker for '{}' exited without a result",
                self.label
            )))),
        }
    }

    /// Wait for the result.
    pub async fn join(self) -> TaskResult<T> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(TaskError::Panicked(format!(
                "worker for '{}' exited without a result",
                self.label
            ))),
        }
    }
}
