//! Main Looker API client and API methods.
//!
//! This module provides the [`LookerClient`], a reqwest-backed implementation
//! of [`crate::LookerApi`]. It logs in lazily and shares one access token
//! across every concurrent call.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Access token acquisition
//! - [`cache`]: Per-run inline query result cache
//! - `projects`, `lookml`, `queries`, `connections`, `legacy`: API methods
//!
//! # Invariants
//! - All methods take `&self`; the client is shared as `Arc<LookerClient>`.
//! - The session token is guarded by a `tokio::sync::Mutex`, so at most one
//!   login is in flight.
//! - Failed requests are never retried.

pub mod builder;
pub mod cache;
mod connections;
mod legacy;
mod lookml;
mod projects;
mod queries;
mod session;

use tokio::sync::Mutex;

use crate::auth::SessionManager;
use cache::QueryCache;

/// Looker API 4.0 client.
///
/// ```rust,ignore
/// use henry_client::{AuthStrategy, LookerClient};
/// use secrecy::SecretString;
///
/// let client = LookerClient::builder()
///     .base_url("https://company.looker.com:19999".to_string())
///     .auth_strategy(AuthStrategy::ClientCredentials {
///         client_id: "id".to_string(),
///         client_secret: SecretString::new("secret".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct LookerClient {
    pub(crate) http: reqwest::Client,
    pub(crate) api_root: String,
    pub(crate) session_manager: Mutex<SessionManager>,
    pub(crate) query_cache: Option<QueryCache>,
}

impl LookerClient {
    pub fn builder() -> builder::LookerClientBuilder {
        builder::LookerClientBuilder::new()
    }

    /// Versioned API root, e.g. `https://host:19999/api/4.0`.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn cache_enabled(&self) -> bool {
        self.query_cache.is_some()
    }
}
