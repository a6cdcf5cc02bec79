//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Environment-mutating tests are `#[serial]` and scope changes with `temp_env`.
//! - Profile files live in `tempfile` directories and are cleaned up automatically.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::ExposeSecret;
use serial_test::serial;
use tempfile::TempDir;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::AuthStrategy;

const ENV_KEYS: [&str; 8] = [
    "LOOKERSDK_BASE_URL",
    "LOOKERSDK_CLIENT_ID",
    "LOOKERSDK_CLIENT_SECRET",
    "LOOKERSDK_VERIFY_SSL",
    "LOOKERSDK_TIMEOUT",
    "LOOKERSDK_API_VERSION",
    "HENRY_ACCESS_TOKEN",
    "HENRY_PROFILE",
];

/// Run `f` with every henry/Looker variable unset except the given overrides.
fn with_clean_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = ENV_KEYS
        .iter()
        .chain(["HENRY_CONFIG_PATH"].iter())
        .map(|key| {
            let value = overrides.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

fn write_profiles(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let body = r#"{
        "profiles": {
            "prod": {
                "base_url": "https://prod.looker.com:19999/",
                "client_id": "prod-id",
                "client_secret": "prod-secret",
                "timeout_seconds": 45
            },
            "partial": {
                "verify_ssl": false
            }
        }
    }"#;
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_builder_with_client_credentials() {
    let config = ConfigLoader::new()
        .with_base_url("https://company.looker.com:19999".to_string())
        .with_client_id("id".to_string())
        .with_client_secret("secret".to_string())
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://company.looker.com:19999");
    assert!(config.connection.verify_ssl);
    assert_eq!(config.connection.api_version, "4.0");
    match config.auth.strategy {
        AuthStrategy::ClientCredentials {
            client_id,
            client_secret,
        } => {
            assert_eq!(client_id, "id");
            assert_eq!(client_secret.expose_secret(), "secret");
        }
        other => panic!("unexpected strategy: {other:?}"),
    }
}

#[test]
fn test_access_token_takes_precedence() {
    let config = ConfigLoader::new()
        .with_base_url("https://company.looker.com".to_string())
        .with_client_id("id".to_string())
        .with_client_secret("secret".to_string())
        .with_access_token("tok".to_string())
        .build()
        .unwrap();

    assert!(matches!(
        config.auth.strategy,
        AuthStrategy::AccessToken { .. }
    ));
}

#[test]
fn test_missing_base_url() {
    let result = ConfigLoader::new()
        .with_access_token("tok".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_blank_base_url_is_missing() {
    let result = ConfigLoader::new()
        .with_base_url("   ".to_string())
        .with_access_token("tok".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_client_id_without_secret_is_missing_auth() {
    let result = ConfigLoader::new()
        .with_base_url("https://company.looker.com".to_string())
        .with_client_id("id".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingAuth)));
}

#[test]
fn test_rejects_non_http_scheme() {
    let result = ConfigLoader::new()
        .with_base_url("ftp://company.looker.com".to_string())
        .with_access_token("tok".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_rejects_relative_url() {
    let result = ConfigLoader::new()
        .with_base_url("company.looker.com".to_string())
        .with_access_token("tok".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_timeout_bounds() {
    let zero = ConfigLoader::new()
        .with_base_url("https://company.looker.com".to_string())
        .with_access_token("tok".to_string())
        .with_timeout(Duration::ZERO)
        .build();
    assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));

    let huge = ConfigLoader::new()
        .with_base_url("https://company.looker.com".to_string())
        .with_access_token("tok".to_string())
        .with_timeout(Duration::from_secs(3601))
        .build();
    assert!(matches!(huge, Err(ConfigError::InvalidTimeout { .. })));

    let max = ConfigLoader::new()
        .with_base_url("https://company.looker.com".to_string())
        .with_access_token("tok".to_string())
        .with_timeout(Duration::from_secs(3600))
        .build()
        .unwrap();
    assert_eq!(max.connection.timeout, Duration::from_secs(3600));
}

#[test]
#[serial]
fn test_profile_values_are_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_profiles(dir.path());

    with_clean_env(&[], || {
        let config = ConfigLoader::new()
            .with_profile_name("prod".to_string())
            .with_config_path(path.clone())
            .from_profile()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.connection.base_url, "https://prod.looker.com:19999");
        assert_eq!(config.connection.timeout, Duration::from_secs(45));
    });
}

#[test]
#[serial]
fn test_env_overrides_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_profiles(dir.path());

    with_clean_env(
        &[("LOOKERSDK_BASE_URL", "https://override.looker.com")],
        || {
            let config = ConfigLoader::new()
                .with_profile_name("prod".to_string())
                .with_config_path(path.clone())
                .from_profile()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://override.looker.com");
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    with_clean_env(
        &[
            ("LOOKERSDK_BASE_URL", "https://env.looker.com"),
            ("LOOKERSDK_CLIENT_ID", "env-id"),
            ("LOOKERSDK_CLIENT_SECRET", "env-secret"),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_base_url("https://cli.looker.com".to_string())
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://cli.looker.com");
        },
    );
}

#[test]
#[serial]
fn test_missing_profile_is_error_without_other_sources() {
    let dir = TempDir::new().unwrap();
    let path = write_profiles(dir.path());

    with_clean_env(&[], || {
        let result = ConfigLoader::new()
            .with_profile_name("staging".to_string())
            .with_config_path(path.clone())
            .from_profile()
            .unwrap()
            .from_env()
            .unwrap()
            .build();

        assert!(matches!(result, Err(ConfigError::ProfileNotFound(name)) if name == "staging"));
    });
}

#[test]
#[serial]
fn test_missing_profile_suppressed_by_complete_env() {
    with_clean_env(
        &[
            ("LOOKERSDK_BASE_URL", "https://env.looker.com"),
            ("HENRY_ACCESS_TOKEN", "tok"),
        ],
        || {
            let config = ConfigLoader::new()
                .with_profile_name("staging".to_string())
                .with_config_path(PathBuf::from("/nonexistent/henry/config.json"))
                .from_profile()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert!(matches!(
                config.auth.strategy,
                AuthStrategy::AccessToken { .. }
            ));
        },
    );
}

#[test]
#[serial]
fn test_profile_selected_by_env() {
    let dir = TempDir::new().unwrap();
    let path = write_profiles(dir.path());
    let path_str = path.to_string_lossy().to_string();

    with_clean_env(
        &[
            ("HENRY_PROFILE", "prod"),
            ("HENRY_CONFIG_PATH", path_str.as_str()),
        ],
        || {
            // Env selects the profile; profile values are then layered under env.
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .from_profile()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://prod.looker.com:19999");
        },
    );
}

#[test]
#[serial]
fn test_whitespace_env_values_are_unset() {
    with_clean_env(
        &[
            ("LOOKERSDK_BASE_URL", "https://env.looker.com"),
            ("HENRY_ACCESS_TOKEN", "   "),
            ("LOOKERSDK_CLIENT_ID", "id"),
            ("LOOKERSDK_CLIENT_SECRET", "secret"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert!(matches!(
                config.auth.strategy,
                AuthStrategy::ClientCredentials { .. }
            ));
        },
    );
}

#[test]
#[serial]
fn test_invalid_env_values() {
    with_clean_env(&[("LOOKERSDK_TIMEOUT", "soon")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { var, .. }) if var == "LOOKERSDK_TIMEOUT"));
    });

    with_clean_env(&[("LOOKERSDK_VERIFY_SSL", "sometimes")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { var, .. }) if var == "LOOKERSDK_VERIFY_SSL"));
    });
}

#[test]
#[serial]
fn test_verify_ssl_from_env() {
    with_clean_env(
        &[
            ("LOOKERSDK_BASE_URL", "https://env.looker.com"),
            ("HENRY_ACCESS_TOKEN", "tok"),
            ("LOOKERSDK_VERIFY_SSL", "false"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert!(!config.connection.verify_ssl);
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_loading() {
    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}
