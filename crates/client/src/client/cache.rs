//! Per-run cache for inline query results.
//!
//! Reports fire the same usage query once per subject; the cache keys on the
//! serialized query so identical queries reach the server once, and
//! concurrent callers of the same key wait on the first request.
//!
//! # Invariants
//! - In memory only; nothing outlives the process.
//! - Failed queries are not cached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use moka::future::Cache as MokaCache;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::metrics;
use crate::models::WriteQuery;

const MAX_ENTRIES: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: MokaCache<String, Arc<Vec<Value>>>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            inner: MokaCache::builder().max_capacity(MAX_ENTRIES).build(),
        }
    }

    /// Cache key for a query.
    pub fn key(query: &WriteQuery) -> Result<String> {
        serde_json::to_string(query)
            .map_err(|e| ClientError::InvalidResponse(format!("unserializable query: {e}")))
    }

    /// Return the cached rows for `query`, running `fetch` on a miss.
    pub async fn get_or_fetch<F>(&self, query: &WriteQuery, fetch: F) -> Result<Vec<Value>>
    where
        F: Future<Output = Result<Vec<Value>>>,
    {
        let key = Self::key(query)?;
        let fetched = AtomicBool::new(false);
        let rows = self
            .inner
            .try_get_with(key, async {
                fetched.store(true, Ordering::Relaxed);
                fetch.await.map(Arc::new)
            })
            .await
            .map_err(|shared| {
                Arc::try_unwrap(shared).unwrap_or_else(|shared| duplicate_error(&shared))
            });
        metrics::record_cache_lookup(!fetched.load(Ordering::Relaxed));
        Ok(rows?.as_ref().clone())
    }
}

/// Rebuild an error that is shared between several waiters.
fn duplicate_error(err: &ClientError) -> ClientError {
    match err {
        ClientError::AuthFailed(m) => ClientError::AuthFailed(m.clone()),
        ClientError::ApiError {
            status,
            url,
            message,
        } => ClientError::ApiError {
            status: *status,
            url: url.clone(),
            message: message.clone(),
        },
        ClientError::Timeout(u) => ClientError::Timeout(u.clone()),
        ClientError::ConnectionRefused(u) => ClientError::ConnectionRefused(u.clone()),
        ClientError::TlsError(m) => ClientError::TlsError(m.clone()),
        ClientError::InvalidUrl(m) => ClientError::InvalidUrl(m.clone()),
        ClientError::NotFound(m) => ClientError::NotFound(m.clone()),
        ClientError::Unauthorized(m) => ClientError::Unauthorized(m.clone()),
        ClientError::InvalidResponse(m) => ClientError::InvalidResponse(m.clone()),
        ClientError::HttpError(e) => ClientError::InvalidResponse(e.to_string()),
    }
}
