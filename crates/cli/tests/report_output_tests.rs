//! End-to-end report tests against a mocked Looker API.

mod common;

use common::{henry_cmd_for, mount_login, mount_models_and_usage};
use henry_client::testing::load_fixture;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[tokio::test]
async fn test_analyze_models_json() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_models_and_usage(&server).await;

    let assert = henry_cmd_for(&server)
        .args(["-o", "json", "analyze", "models", "--project", "thelook"])
        .assert()
        .success();

    assert_eq!(
        stdout_json(&assert.get_output().stdout),
        json!([{
            "Project": "thelook",
            "Model": "thelook",
            "# Explores": 2,
            "# Unused Explores": 2,
            "Query Count": 42
        }])
    );
}

#[tokio::test]
async fn test_sort_and_limit_apply_before_output() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_models_and_usage(&server).await;

    let assert = henry_cmd_for(&server)
        .args(["-o", "json", "--sortkey", "Query Count", "asc", "--limit", "1"])
        .args(["analyze", "models"])
        .assert()
        .success();

    let rows = stdout_json(&assert.get_output().stdout);
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["Model"], "system__activity");
    assert_eq!(rows[0]["Query Count"], 0);
}

#[tokio::test]
async fn test_vacuum_models_table() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_models_and_usage(&server).await;

    henry_cmd_for(&server)
        .args(["--threads", "1", "vacuum", "models", "--project", "thelook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model    Model Query Count  Unused Explores"))
        .stdout(predicate::str::contains(format!("thelook  42{}orders", " ".repeat(17))))
        .stdout(predicate::str::contains(format!("{}users", " ".repeat(28))));
}

#[tokio::test]
async fn test_save_writes_csv_file() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_models_and_usage(&server).await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("unused.csv");

    henry_cmd_for(&server)
        .args(["-o", "csv", "--save"])
        .arg(&out)
        .args(["vacuum", "models", "--project", "thelook"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Results written to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        content,
        "Model,Model Query Count,Unused Explores\nthelook,42,\"orders\nusers\"\n"
    );
}

async fn mount_pulse(server: &MockServer) {
    mount_login(server).await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/connections"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("connections/list_connections.json")),
        )
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/api/4\.0/connections/[^/]+/test$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("connections/test_connection.json")),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/legacy_features"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pulse_emits_one_json_line_per_check() {
    let server = MockServer::start().await;
    mount_pulse(&server).await;

    let assert = henry_cmd_for(&server)
        .args(["-o", "json", "pulse"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let reports: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON report"))
        .collect();

    let names: BTreeSet<&str> = reports.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(reports.len(), 6);
    assert_eq!(
        names,
        BTreeSet::from([
            "dashboard_errors",
            "dashboard_performance",
            "db_connections",
            "explore_performance",
            "legacy_features",
            "schedule_failures",
        ])
    );

    let legacy = reports.iter().find(|r| r["name"] == "legacy_features").unwrap();
    assert!(legacy["error"].as_str().unwrap().contains("boom"));

    let connections = reports.iter().find(|r| r["name"] == "db_connections").unwrap();
    let rows = connections["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Connection"], "warehouse");
}

#[tokio::test]
async fn test_pulse_table_prints_every_title() {
    let server = MockServer::start().await;
    mount_pulse(&server).await;

    henry_cmd_for(&server)
        .arg("pulse")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking connections"))
        .stdout(predicate::str::contains("Checking for failing schedules"))
        .stdout(predicate::str::contains("Check failed:"));
}
