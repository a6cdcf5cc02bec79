//! Database connection models.

use serde::{Deserialize, Serialize};

/// SQL dialect of a connection, including the tests it supports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dialect {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connection_tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConnection {
    pub name: String,
    #[serde(default)]
    pub dialect: Option<Dialect>,
    #[serde(default)]
    pub host: Option<String>,
}

impl DbConnection {
    /// Tests supported by this connection's dialect.
    pub fn supported_tests(&self) -> &[String] {
        self.dialect
            .as_ref()
            .map(|d| d.connection_tests.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConnectionTestResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connection_string: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// `success`, `error` or `skipped`
    #[serde(default)]
    pub status: String,
}

impl DbConnectionTestResult {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
