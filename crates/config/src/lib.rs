//! Configuration management for henry.
//!
//! This crate provides types and loaders for the Looker connection settings
//! henry needs: `.env` files, JSON profile files, `LOOKERSDK_*` environment
//! variables and explicit overrides, merged by [`ConfigLoader`].

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, ProfileConfig, ProfileFile};
