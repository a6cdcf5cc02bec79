//! Completion barrier for one batch of submitted work.
//!
//! A [`Batch`] is a counting wait-group: every submission registers a
//! [`Ticket`], and dropping the ticket marks that unit complete. The
//! orchestrator parks on a `tokio::sync::Notify` until the count reaches
//! zero; it never polls.
//!
//! # Invariants
//! - `await_all` consumes the batch, so nothing can be attached to a batch
//!   after it has been awaited.
//! - A ticket is released exactly once, including when its task panics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct WaitGroup {
    pending: AtomicUsize,
    notify: Notify,
}

/// All handles submitted for one report step.
#[derive(Debug, Default)]
pub struct Batch {
    group: Arc<WaitGroup>,
    submitted: usize,
}

/// Completion token held by one submitted unit of work.
#[derive(Debug)]
pub struct Ticket {
    group: Arc<WaitGroup>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if self.group.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            // notify_one stores a permit when nobody is waiting yet.
            self.group.notify.notify_one();
        }
    }
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more unit of work with this batch.
    pub fn register(&mut self) -> Ticket {
        self.group.pending.fetch_add(1, Ordering::AcqRel);
        self.submitted += 1;
        Ticket {
            group: Arc::clone(&self.group),
        }
    }

    /// Number of units registered so far.
    pub fn len(&self) -> usize {
        self.submitted
    }

    pub fn is_empty(&self) -> bool {
        self.submitted == 0
    }

    /// Units that have not completed yet.
    pub fn pending(&self) -> usize {
        self.group.pending.load(Ordering::Acquire)
    }

    /// Wait until every registered unit has completed.
    pub async fn await_all(self) {
        tracing::debug!(submitted = self.submitted, "awaiting batch");
        while self.group.pending.load(Ordering::Acquire) != 0 {
            self.group.notify.notified().await;
        }
    }
}
