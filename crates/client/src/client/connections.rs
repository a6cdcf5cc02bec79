//! Database connection methods for [`LookerClient`].

use crate::client::LookerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{DbConnection, DbConnectionTestResult};

impl LookerClient {
    pub async fn list_connections(&self) -> Result<Vec<DbConnection>> {
        let token = self.auth_token().await?;
        endpoints::list_connections(&self.http, &self.api_root, &token).await
    }

    pub async fn test_connection(
        &self,
        connection: &str,
        tests: &[String],
    ) -> Result<Vec<DbConnectionTestResult>> {
        let token = self.auth_token().await?;
        endpoints::test_connection(&self.http, &self.api_root, &token, connection, tests).await
    }
}
