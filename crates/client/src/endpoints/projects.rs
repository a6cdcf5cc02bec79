//! Project, project file and git connection test endpoints.

use reqwest::Client;

use crate::endpoints::encode_segment;
use crate::endpoints::request::{authorized, decode, send_request};
use crate::error::Result;
use crate::models::{GitConnectionTest, GitConnectionTestResult, Project, ProjectFile};

pub async fn list_projects(client: &Client, base_url: &str, auth_token: &str) -> Result<Vec<Project>> {
    let url = format!("{base_url}/projects");
    let response = send_request(authorized(client.get(&url), auth_token), "/projects", "GET").await?;
    decode(response, "/projects").await
}

pub async fn get_project(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    project_id: &str,
) -> Result<Project> {
    let url = format!("{base_url}/projects/{}", encode_segment(project_id));
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/projects/{project_id}",
        "GET",
    )
    .await?;
    decode(response, "/projects/{project_id}").await
}

pub async fn list_project_files(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    project_id: &str,
) -> Result<Vec<ProjectFile>> {
    let url = format!("{base_url}/projects/{}/files", encode_segment(project_id));
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/projects/{project_id}/files",
        "GET",
    )
    .await?;
    decode(response, "/projects/{project_id}/files").await
}

pub async fn list_git_connection_tests(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    project_id: &str,
) -> Result<Vec<GitConnectionTest>> {
    let url = format!(
        "{base_url}/projects/{}/git_connection_tests",
        encode_segment(project_id)
    );
    let response = send_request(
        authorized(client.get(&url), auth_token),
        "/projects/{project_id}/git_connection_tests",
        "GET",
    )
    .await?;
    decode(response, "/projects/{project_id}/git_connection_tests").await
}

pub async fn run_git_connection_test(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    project_id: &str,
    test_id: &str,
) -> Result<GitConnectionTestResult> {
    let url = format!(
        "{base_url}/projects/{}/git_connection_tests/{}",
        encode_segment(project_id),
        encode_segment(test_id)
    );
    let response = send_request(
        authorized(client.put(&url), auth_token),
        "/projects/{project_id}/git_connection_tests/{test_id}",
        "PUT",
    )
    .await?;
    decode(response, "/projects/{project_id}/git_connection_tests/{test_id}").await
}
