//! Shared test utilities for henry CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Commands built here never read a local `.env` or the host's Looker settings.
//! - Mock servers are started per test; nothing is shared between tests.

use assert_cmd::Command;
use henry_client::testing::load_fixture;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `henry` command for integration testing.
///
/// - `DOTENV_DISABLED=1` prevents local `.env` contamination.
/// - API3 credentials are set to dummy values to satisfy config validation.
/// - Other Looker env vars are cleared so nothing leaks from the host.
pub fn henry_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("henry");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("LOOKERSDK_CLIENT_ID", "test-id")
        .env("LOOKERSDK_CLIENT_SECRET", "test-secret");

    cmd.env_remove("LOOKERSDK_BASE_URL")
        .env_remove("LOOKERSDK_VERIFY_SSL")
        .env_remove("LOOKERSDK_TIMEOUT")
        .env_remove("LOOKERSDK_API_VERSION")
        .env_remove("HENRY_ACCESS_TOKEN")
        .env_remove("HENRY_PROFILE")
        .env_remove("HENRY_CONFIG_PATH")
        .env_remove("HENRY_METRICS_BIND")
        .env_remove("RUST_LOG");

    cmd
}

/// Hermetic command pointed at a mock server, without progress output.
#[allow(dead_code)]
pub fn henry_cmd_for(server: &MockServer) -> Command {
    let mut cmd = henry_cmd();
    cmd.env("LOOKERSDK_BASE_URL", server.uri()).arg("--quiet");
    cmd
}

/// Mount a successful `/login` on `server`.
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/4.0/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .mount(server)
        .await;
}

/// Mount the model list and answer every inline query with the used-models rows.
#[allow(dead_code)]
pub async fn mount_models_and_usage(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/4.0/lookml_models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("lookml/list_models.json")),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/4.0/queries/run/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("queries/used_models.json")),
        )
        .mount(server)
        .await;
}
