//! Inline query execution and caching tests.

mod common;

use common::*;
use henry_client::{ClientError, WriteQuery};
use wiremock::matchers::{body_json, method, path};

fn used_models_query() -> WriteQuery {
    WriteQuery::new("i__looker", "history")
        .fields(["query.model", "history.query_run_count"])
        .filter("history.created_date", "90 days")
        .limit(5000)
}

#[tokio::test]
async fn test_run_inline_query_posts_query_body() {
    let mock_server = MockServer::start().await;
    let query = used_models_query();

    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .and(body_json(serde_json::to_value(&query).unwrap()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("queries/used_models.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let rows = endpoints::run_inline_query(&client, &api_root(&mock_server), "tok", &query)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["history.query_run_count"], 42);
}

#[tokio::test]
async fn test_looker_error_row_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("queries/looker_error.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let result = endpoints::run_inline_query(
        &client,
        &api_root(&mock_server),
        "tok",
        &used_models_query(),
    )
    .await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(msg)) if msg.contains("Unknown field")));
}

#[tokio::test]
async fn test_identical_queries_hit_server_once_when_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("queries/used_models.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server);
    for _ in 0..4 {
        let rows = client.run_inline_query(&used_models_query()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}

#[tokio::test]
async fn test_disabled_cache_sends_every_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/4.0/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("queries/used_models.json")),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = credentials_client(&mock_server, false);
    for _ in 0..3 {
        client.run_inline_query(&used_models_query()).await.unwrap();
    }
}
