//! Access token acquisition.
//!
//! # Invariants
//! - The session mutex is held across the login call, so concurrent tasks
//!   that find no token wait for a single login instead of racing.
//! - Static access tokens never trigger a login.

use secrecy::ExposeSecret;

use crate::auth::AuthStrategy;
use crate::client::LookerClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::Workspace;

impl LookerClient {
    /// Current access token, logging in first when needed.
    pub(crate) async fn auth_token(&self) -> Result<String> {
        let mut session = self.session_manager.lock().await;
        if let Some(token) = session.current_token() {
            return Ok(token.to_string());
        }

        let AuthStrategy::ClientCredentials {
            client_id,
            client_secret,
        } = session.strategy().clone()
        else {
            return Err(ClientError::AuthFailed(
                "access token is not available".to_string(),
            ));
        };

        let issued = endpoints::login(
            &self.http,
            &self.api_root,
            &client_id,
            client_secret.expose_secret(),
        )
        .await?;
        tracing::debug!(expires_in = ?issued.expires_in, "obtained access token");
        session.set_session_token(issued.access_token.clone(), issued.expires_in);
        Ok(issued.access_token)
    }

    /// Log in eagerly, surfacing credential problems before a report starts.
    pub async fn login(&self) -> Result<()> {
        self.auth_token().await.map(|_| ())
    }

    pub async fn update_session_workspace(&self, workspace: Workspace) -> Result<()> {
        let token = self.auth_token().await?;
        endpoints::update_session(&self.http, &self.api_root, &token, workspace).await?;
        Ok(())
    }
}
