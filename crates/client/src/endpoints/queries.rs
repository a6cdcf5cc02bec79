//! Inline query execution.

use reqwest::Client;
use serde_json::Value;

use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::{ClientError, Result};
use crate::models::WriteQuery;

/// Run a query without saving it and return its JSON rows.
///
/// Looker reports query-level failures inside a 200 response as a single
/// row carrying `looker_error`; those are surfaced as `InvalidResponse`.
pub async fn run_inline_query(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    query: &WriteQuery,
) -> Result<Vec<Value>> {
    let url = format!("{base_url}/queries/run/json");
    let response = send_request(
        authorized(client.post(&url), auth_token).json(query),
        "/queries/run/json",
        "POST",
    )
    .await?;

    let rows: Vec<Value> = decode(response, "/queries/run/json").await?;
    if let Some(message) = rows
        .first()
        .and_then(|row| row.get("looker_error"))
        .and_then(Value::as_str)
    {
        return Err(ClientError::InvalidResponse(format!(
            "query on {}.{} failed: {message}",
            query.model, query.view
        )));
    }
    Ok(rows)
}
