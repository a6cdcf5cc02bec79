//! API session endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::Result;
use crate::models::{ApiSession, Workspace};

/// Switch the API session between the `dev` and `production` workspaces.
pub async fn update_session(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    workspace: Workspace,
) -> Result<ApiSession> {
    debug!(workspace = workspace.as_str(), "switching session workspace");
    let url = format!("{base_url}/session");
    let body = ApiSession {
        workspace_id: workspace.as_str().to_string(),
    };
    let response = send_request(
        authorized(client.patch(&url), auth_token).json(&body),
        "/session",
        "PATCH",
    )
    .await?;
    decode(response, "/session").await
}
