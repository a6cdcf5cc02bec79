//! Project, file, git connection test and session endpoint tests.

mod common;

use common::*;
use henry_client::models::{PullRequestMode, Workspace};
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_list_projects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/4.0/projects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("projects/list_projects.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let projects = endpoints::list_projects(&client, &api_root(&mock_server), "tok")
        .await
        .unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].pull_request_mode, PullRequestMode::Required);
    assert!(projects[0].validation_required);
    assert!(!projects[0].is_bare_repo());
    assert!(projects[1].is_bare_repo());
}

#[tokio::test]
async fn test_list_project_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/4.0/projects/thelook/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("projects/list_project_files.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let files = endpoints::list_project_files(&client, &api_root(&mock_server), "tok", "thelook")
        .await
        .unwrap();

    assert_eq!(files.iter().filter(|f| f.is_type("model")).count(), 1);
    assert_eq!(files.iter().filter(|f| f.is_type("view")).count(), 2);
}

#[tokio::test]
async fn test_git_connection_tests_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/4.0/projects/thelook/git_connection_tests"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("projects/git_connection_tests.json")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/4.0/projects/thelook/git_connection_tests/git_auth"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("projects/git_connection_test_fail.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let root = api_root(&mock_server);
    let tests = endpoints::list_git_connection_tests(&client, &root, "tok", "thelook")
        .await
        .unwrap();
    assert_eq!(tests.len(), 2);

    let result = endpoints::run_git_connection_test(&client, &root, "tok", "thelook", "git_auth")
        .await
        .unwrap();
    assert!(!result.passed());
    assert_eq!(result.status, "fail");
}

#[tokio::test]
async fn test_update_session_sends_workspace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/4.0/session"))
        .and(body_json(serde_json::json!({"workspace_id": "dev"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"workspace_id": "dev"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let session =
        endpoints::update_session(&client, &api_root(&mock_server), "tok", Workspace::Dev)
            .await
            .unwrap();
    assert_eq!(session.workspace_id, "dev");
}
