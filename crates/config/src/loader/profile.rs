//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Resolve the profile file location.
//! - Apply a named profile's settings to a `ConfigLoader`.
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - A missing file or missing profile is recorded, not raised; `build()` decides.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::types::{ProfileConfig, ProfileFile};

/// Returns the default path to the profile file.
///
/// - Linux: `~/.config/henry/config.json`
/// - macOS: `~/Library/Application Support/henry/config.json`
/// - Windows: `%AppData%\henry\config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for this user".to_string())
    })?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Apply profile configuration from the profile file to the loader.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let Some(profile_name) = loader.profile_name().cloned() else {
        return Ok(());
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "profile file not found");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = ProfileFile::read(&config_path)?;
    match file.profile(&profile_name) {
        Some(profile) => apply_profile_config(loader, profile),
        None => loader.set_profile_missing(Some(profile_name)),
    }
    Ok(())
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if let Some(url) = &profile.base_url {
        loader.set_base_url(Some(url.clone()));
    }
    if let Some(id) = &profile.client_id {
        loader.set_client_id(Some(id.clone()));
    }
    if let Some(secret) = &profile.client_secret {
        loader.set_client_secret(Some(secret.clone()));
    }
    if let Some(token) = &profile.access_token {
        loader.set_access_token(Some(token.clone()));
    }
    if let Some(verify) = profile.verify_ssl {
        loader.set_verify_ssl(Some(verify));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(version) = &profile.api_version {
        loader.set_api_version(Some(version.clone()));
    }
}
