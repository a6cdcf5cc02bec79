//! Legacy feature methods for [`LookerClient`].

use crate::client::LookerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::LegacyFeature;

impl LookerClient {
    pub async fn list_legacy_features(&self) -> Result<Vec<LegacyFeature>> {
        let token = self.auth_token().await?;
        endpoints::list_legacy_features(&self.http, &self.api_root, &token).await
    }
}
