//! Centralized constants for the henry workspace.
//!
//! Default values used across crates, kept here to avoid magic number
//! duplication between the CLI, the client and the report engine.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Looker API version prefix used for every request.
pub const DEFAULT_API_VERSION: &str = "4.0";

// =============================================================================
// Report Defaults
// =============================================================================

/// Default number of concurrent workers used by a report invocation.
pub const DEFAULT_WORKERS: usize = 8;

/// Default usage window, in days, for query history lookups.
pub const DEFAULT_TIMEFRAME_DAYS: u32 = 90;

/// Default minimum query count for an entity to count as "used".
pub const DEFAULT_MIN_QUERIES: u64 = 0;

/// Row limit applied to history queries issued by usage lookups.
pub const DEFAULT_HISTORY_ROW_LIMIT: u32 = 5000;

/// Display width used when wrapping connection test error messages.
pub const DEFAULT_STATUS_WRAP_WIDTH: usize = 100;

// =============================================================================
// File Locations
// =============================================================================

/// Application name used for config directory resolution.
pub const APP_NAME: &str = "henry";

/// File name of the JSON profile file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
