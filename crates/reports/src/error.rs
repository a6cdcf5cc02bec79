//! Error types for the report engine.

use henry_client::ClientError;
use thiserror::Error;

/// Errors that abort a report invocation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Worker pool configured with zero workers.
    #[error("worker count must be at least 1")]
    InvalidWorkers,

    /// The subject list came back empty.
    #[error("{0}")]
    NotFound(String),

    /// The subject list could not be retrieved.
    #[error("{context}: {source}")]
    Enumeration {
        context: String,
        #[source]
        source: ClientError,
    },

    /// A handle was resolved before its task completed.
    #[error("task for '{0}' was resolved before it completed")]
    Unresolved(String),

    /// A step the whole report depends on did not complete.
    #[error("{0}")]
    Aborted(String),

    /// A resolved value did not have the expected shape.
    #[error("malformed result: {0}")]
    Derivation(String),

    /// Sort key does not name a report column.
    #[error("unknown sort column '{column}'; available columns: {available}")]
    InvalidSortKey { column: String, available: String },
}

impl ReportError {
    pub(crate) fn enumeration(context: impl Into<String>, source: ClientError) -> Self {
        Self::Enumeration {
            context: context.into(),
            source,
        }
    }

    /// The client error behind an enumeration failure, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Enumeration { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a single submitted unit of work.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("{0}")]
    Failed(String),

    #[error("task panicked: {0}")]
    Panicked(String),
}

impl From<ReportError> for TaskError {
    fn from(err: ReportError) -> Self {
        Self::Failed(err.to_string())
    }
}
