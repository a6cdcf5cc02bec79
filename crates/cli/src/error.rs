//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, report and configuration errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is shared with clap usage errors; clap exits before any of this runs.

use henry_client::ClientError;
use henry_config::ConfigError;
use henry_reports::ReportError;

/// Structured exit codes for henry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - invalid API3 credentials or expired token.
    AuthenticationFailed = 2,

    /// Connection error - network, TLS, timeout, or DNS failure.
    ConnectionError = 3,

    /// Nothing matched - no projects, models or explores for the given filters.
    NotFound = 4,

    /// Validation error - bad option values or configuration.
    ValidationError = 5,

    /// Permission denied - the API user lacks a required permission.
    PermissionDenied = 6,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::Unauthorized(_) => {
                ExitCode::AuthenticationFailed
            }

            ClientError::ConnectionRefused(_)
            | ClientError::Timeout(_)
            | ClientError::InvalidUrl(_)
            | ClientError::TlsError(_) => ExitCode::ConnectionError,

            ClientError::NotFound(_) => ExitCode::NotFound,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::ApiError { status, .. } => match status {
                400 | 422 => ExitCode::ValidationError,
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::NotFound(_) => ExitCode::NotFound,
            ReportError::InvalidWorkers | ReportError::InvalidSortKey { .. } => {
                ExitCode::ValidationError
            }
            ReportError::Enumeration { source, .. } => ExitCode::from(source),
            ReportError::Unresolved(_) | ReportError::Aborted(_) | ReportError::Derivation(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { .. }
            | ConfigError::MissingBaseUrl
            | ConfigError::MissingAuth
            | ConfigError::ProfileNotFound(_)
            | ConfigError::InvalidTimeout { .. } => ExitCode::ValidationError,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if nothing in the chain is recognized.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(report_err) = cause.downcast_ref::<ReportError>() {
                return ExitCode::from(report_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }
        ExitCode::GeneralError
    }
}
