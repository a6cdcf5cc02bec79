//! Database connection endpoints.

use reqwest::Client;

use crate::endpoints::encode_segment;
use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::Result;
use crate::models::{DbConnection, DbConnectionTestResult};

pub async fn list_connections(
    client: &Client,
    base_url: &str,
    auth_token: &str,
) -> Result<Vec<DbConnection>> {
    let url = format!("{base_url}/connections");
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/connections",
        "GET",
    )
    .await?;
    decode(response, "/connections").await
}

/// Run the named dialect tests against a connection.
///
/// An empty `tests` slice lets Looker run every test the dialect supports.
pub async fn test_connection(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    connection: &str,
    tests: &[String],
) -> Result<Vec<DbConnectionTestResult>> {
    let url = format!("{base_url}/connections/{}/test", encode_segment(connection));
    let mut builder = authorized(client.put(&url), auth_token);
    if !tests.is_empty() {
        builder = builder.query(&[("tests", tests.join(","))]);
    }
    let response = send_request(builder, "/connections/{connection}/test", "PUT").await?;
    decode(response, "/connections/{connection}/test").await
}
