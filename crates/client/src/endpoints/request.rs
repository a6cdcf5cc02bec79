//! Shared request execution and error mapping.
//!
//! Every endpoint sends through [`send_request`]: one attempt, no retries.
//! Non-2xx responses become [`ClientError::ApiError`] with the Looker
//! `message` extracted when the body is a JSON error document.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics;
use crate::models::LookerErrorBody;

/// Attach the Looker API authorization header.
pub(crate) fn authorized(builder: RequestBuilder, auth_token: &str) -> RequestBuilder {
    builder.header("Authorization", format!("token {auth_token}"))
}

/// Send a request once and map failures.
pub async fn send_request(builder: RequestBuilder, endpoint: &str, method: &str) -> Result<Response> {
    debug!(endpoint, method, "sending request");
    let started = Instant::now();
    let result = execute(builder, endpoint, method).await;

    let status = match &result {
        Ok(response) => Some(response.status().as_u16()),
        Err(err) => err.status(),
    };
    metrics::record_request(endpoint, method, started.elapsed(), status);
    if let Err(err) = &result {
        metrics::record_client_error(endpoint, method, err);
    }
    result
}

async fn execute(builder: RequestBuilder, endpoint: &str, method: &str) -> Result<Response> {
    let response = builder.send().await.map_err(ClientError::from_transport)?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<LookerErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => body,
    };

    debug!(endpoint, method, status, "request failed");
    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}

/// Decode a JSON body, reporting the endpoint on malformed payloads.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let bytes = response.bytes().await.map_err(ClientError::from_transport)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("{endpoint}: {e}")))
}
