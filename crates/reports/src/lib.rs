//! Concurrent report engine for henry.
//!
//! Each report enumerates its subjects, fans the per-subject remote work out
//! onto a bounded [`TaskPool`], waits for the [`Batch`] to drain, then
//! resolves every [`Record`] into a [`ResolvedRecord`] in enumeration order.
//!
//! - [`analyze`]: projects, models and explores with health and usage figures
//! - [`vacuum`]: unused explores, joins and fields
//! - [`pulse`]: independent instance health checks, emitted as they finish

pub mod analyze;
pub mod barrier;
pub mod context;
pub mod derive;
pub mod error;
mod explore_stats;
pub mod metrics;
pub mod options;
pub mod pool;
pub mod pulse;
pub mod record;
pub mod subjects;
pub mod usage;
pub mod vacuum;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use barrier::Batch;
pub use context::{ReportContext, Usage};
pub use error::{ReportError, TaskError};
pub use options::{SortKey, apply_sort_limit};
pub use pool::{TaskHandle, TaskPool, TaskResult};
pub use pulse::{CheckOutcome, CheckRegistry, CheckReport};
pub use record::{Cell, Record, ResolvedRecord};
pub use usage::UsageWindow;
