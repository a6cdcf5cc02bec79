//! Authentication endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{decode, send_request};
use crate::error::{ClientError, Result};
use crate::models::AccessToken;

/// Exchange API3 credentials for an access token.
///
/// A 401/403/404 from `/login` means the credentials were rejected.
pub async fn login(
    client: &Client,
    base_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken> {
    debug!("Logging in to Looker as client {}", client_id);

    let url = format!("{base_url}/login");
    let builder = client
        .post(&url)
        .form(&[("client_id", client_id), ("client_secret", client_secret)]);

    let response = match send_request(builder, "/login", "POST").await {
        Ok(response) => response,
        Err(ClientError::ApiError {
            status: 401 | 403 | 404,
            message,
            ..
        }) => return Err(ClientError::AuthFailed(message)),
        Err(e) => return Err(e),
    };

    decode(response, "/login").await
}
