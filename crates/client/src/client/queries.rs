//! Inline query methods for [`LookerClient`].

use serde_json::Value;

use crate::client::LookerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::WriteQuery;

impl LookerClient {
    /// Run an inline query, answering from the query cache when enabled.
    pub async fn run_inline_query(&self, query: &WriteQuery) -> Result<Vec<Value>> {
        let fetch = async {
            let token = self.auth_token().await?;
            endpoints::run_inline_query(&self.http, &self.api_root, &token, query).await
        };

        match &self.query_cache {
            Some(cache) => cache.get_or_fetch(query, fetch).await,
            None => fetch.await,
        }
    }
}
