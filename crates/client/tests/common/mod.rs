//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root.
//! - Mock servers are started per test; nothing is shared between tests.

#[allow(unused_imports)]
pub use henry_client::endpoints;
#[allow(unused_imports)]
pub use henry_client::testing::load_fixture;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use henry_client::{AuthStrategy, LookerClient};
use secrecy::SecretString;

/// API root the client uses for a mock server.
#[allow(dead_code)]
pub fn api_root(server: &MockServer) -> String {
    format!("{}/api/4.0", server.uri())
}

/// Client that logs in with client credentials against `server`.
#[allow(dead_code)]
pub fn credentials_client(server: &MockServer, cache: bool) -> LookerClient {
    LookerClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::ClientCredentials {
            client_id: "test-id".to_string(),
            client_secret: SecretString::new("test-secret".to_string().into()),
        })
        .cache_queries(cache)
        .build()
        .expect("client builds")
}

/// Client authenticated with a static access token.
#[allow(dead_code)]
pub fn token_client(server: &MockServer) -> LookerClient {
    LookerClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::AccessToken {
            token: SecretString::new("static-token".to_string().into()),
        })
        .build()
        .expect("client builds")
}
