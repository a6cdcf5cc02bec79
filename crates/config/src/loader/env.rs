//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read the `LOOKERSDK_*` / `HENRY_*` variables and apply them to a `ConfigLoader`.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid boolean/numeric values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none("HENRY_CONFIG_PATH")
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("HENRY_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }
    if let Some(url) = env_var_or_none("LOOKERSDK_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(id) = env_var_or_none("LOOKERSDK_CLIENT_ID") {
        loader.set_client_id(Some(id));
    }
    if let Some(secret) = env_var_or_none("LOOKERSDK_CLIENT_SECRET") {
        loader.set_client_secret(Some(SecretString::new(secret.into())));
    }
    if let Some(token) = env_var_or_none("HENRY_ACCESS_TOKEN") {
        loader.set_access_token(Some(SecretString::new(token.into())));
    }
    if let Some(verify) = env_var_or_none("LOOKERSDK_VERIFY_SSL") {
        loader.set_verify_ssl(Some(parse_bool("LOOKERSDK_VERIFY_SSL", &verify)?));
    }
    if let Some(timeout) = env_var_or_none("LOOKERSDK_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "LOOKERSDK_TIMEOUT".to_string(),
            message: "must be a number of seconds".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(version) = env_var_or_none("LOOKERSDK_API_VERSION") {
        loader.set_api_version(Some(version));
    }
    Ok(())
}
