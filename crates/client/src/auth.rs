//! Authentication strategies and session management.

use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with Looker.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// API3 credentials exchanged for an access token on first use.
    ClientCredentials {
        client_id: String,
        client_secret: SecretString,
    },
    /// Pre-issued access token.
    AccessToken { token: SecretString },
}

/// Holds the current access token for a client.
///
/// Access tokens issued by `POST /login` carry an `expires_in`; a token is
/// considered stale slightly before that so in-flight requests do not race
/// the expiry.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session_token: Option<SessionToken>,
}

#[derive(Debug, Clone)]
struct SessionToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

impl SessionToken {
    fn is_stale(&self) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()) < EXPIRY_BUFFER)
            .unwrap_or(false)
    }
}

impl SessionManager {
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            session_token: None,
        }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Token to send, if one is available and fresh.
    pub fn current_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::AccessToken { token } => Some(token.expose_secret()),
            AuthStrategy::ClientCredentials { .. } => self
                .session_token
                .as_ref()
                .filter(|t| !t.is_stale())
                .map(|t| t.value.expose_secret()),
        }
    }

    pub fn set_session_token(&mut self, token: String, expires_in: Option<u64>) {
        self.session_token = Some(SessionToken {
            value: SecretString::new(token.into()),
            expires_at: expires_in.map(|secs| Instant::now() + Duration::from_secs(secs)),
        });
    }
}
