//! Configuration type definitions for henry.
//!
//! Responsibilities:
//! - Define authentication strategies and connection settings.
//! - Define the on-disk profile file shape.
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

mod auth;
pub(crate) mod connection;
mod profile;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use profile::{ProfileConfig, ProfileFile};
