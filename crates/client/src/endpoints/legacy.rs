//! Legacy feature endpoints.

use reqwest::Client;

use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::Result;
use crate::models::LegacyFeature;

pub async fn list_legacy_features(
    client: &Client,
    base_url: &str,
    auth_token: &str,
) -> Result<Vec<LegacyFeature>> {
    let url = format!("{base_url}/legacy_features");
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/legacy_features",
        "GET",
    )
    .await?;
    decode(response, "/legacy_features").await
}
