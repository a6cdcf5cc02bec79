//! Project methods for [`LookerClient`].

use crate::client::LookerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{GitConnectionTest, GitConnectionTestResult, Project, ProjectFile};

impl LookerClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let token = self.auth_token().await?;
        endpoints::list_projects(&self.http, &self.api_root, &token).await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let token = self.auth_token().await?;
        endpoints::get_project(&self.http, &self.api_root, &token, project_id).await
    }

    pub async fn list_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        let token = self.auth_token().await?;
        endpoints::list_project_files(&self.http, &self.api_root, &token, project_id).await
    }

    pub async fn list_git_connection_tests(&self, project_id: &str) -> Result<Vec<GitConnectionTest>> {
        let token = self.auth_token().await?;
        endpoints::list_git_connection_tests(&self.http, &self.api_root, &token, project_id).await
    }

    pub async fn run_git_connection_test(
        &self,
        project_id: &str,
        test_id: &str,
    ) -> Result<GitConnectionTestResult> {
        let token = self.auth_token().await?;
        endpoints::run_git_connection_test(&self.http, &self.api_root, &token, project_id, test_id)
            .await
    }
}
