//! Client builder for constructing [`LookerClient`] instances.
//!
//! # Invariants
//! - `base_url` and `auth_strategy` are required.
//! - The base URL is normalized to have no trailing slashes before the
//!   `/api/{version}` suffix is appended.
//! - Disabling TLS verification only affects HTTPS URLs.

use std::time::Duration;

use tokio::sync::Mutex;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::LookerClient;
use crate::client::cache::QueryCache;
use crate::error::{ClientError, Result};
use henry_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`LookerClient`].
pub struct LookerClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    verify_ssl: bool,
    timeout: Duration,
    api_version: String,
    cache_queries: bool,
}

impl Default for LookerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            verify_ssl: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_version: DEFAULT_API_VERSION.to_string(),
            cache_queries: true,
        }
    }
}

impl LookerClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host URL including port, e.g. `https://company.looker.com:19999`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_version(mut self, version: String) -> Self {
        self.api_version = version;
        self
    }

    /// Enable or disable the inline query result cache (enabled by default).
    pub fn cache_queries(mut self, enabled: bool) -> Self {
        self.cache_queries = enabled;
        self
    }

    /// Pre-configure the builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::ClientCredentials {
                client_id,
                client_secret,
            } => AuthStrategy::ClientCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
            ConfigAuthStrategy::AccessToken { token } => AuthStrategy::AccessToken {
                token: token.clone(),
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = Some(auth_strategy);
        self.verify_ssl = config.connection.verify_ssl;
        self.timeout = config.connection.timeout;
        self.api_version = config.connection.api_version.clone();
        self
    }

    /// Build the [`LookerClient`].
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidUrl`] without a base URL, [`ClientError::AuthFailed`]
    /// without an auth strategy, `ClientError::HttpError` if reqwest fails to
    /// build its client.
    pub fn build(self) -> Result<LookerClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder().timeout(self.timeout);

        if !self.verify_ssl {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!("verify_ssl=false has no effect on HTTP URLs");
            }
        }

        let http = http_builder.build()?;

        Ok(LookerClient {
            http,
            api_root: format!("{base_url}/api/{}", self.api_version),
            session_manager: Mutex::new(SessionManager::new(auth_strategy)),
            query_cache: self.cache_queries.then(QueryCache::new),
        })
    }
}
