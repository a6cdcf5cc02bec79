//! LookML model and explore methods for [`LookerClient`].

use crate::client::LookerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{LookmlModel, LookmlModelExplore};

impl LookerClient {
    pub async fn list_lookml_models(&self) -> Result<Vec<LookmlModel>> {
        let token = self.auth_token().await?;
        endpoints::list_lookml_models(&self.http, &self.api_root, &token).await
    }

    pub async fn get_lookml_model(&self, model: &str) -> Result<LookmlModel> {
        let token = self.auth_token().await?;
        endpoints::get_lookml_model(&self.http, &self.api_root, &token, model).await
    }

    pub async fn get_lookml_model_explore(
        &self,
        model: &str,
        explore: &str,
    ) -> Result<LookmlModelExplore> {
        let token = self.auth_token().await?;
        endpoints::get_lookml_model_explore(&self.http, &self.api_root, &token, model, explore)
            .await
    }
}
