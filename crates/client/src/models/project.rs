//! Project models for the Looker projects API.

use serde::{Deserialize, Serialize};

/// Pull request mode configured on a project's git integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestMode {
    #[default]
    Off,
    Links,
    Recommended,
    Required,
}

impl PullRequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Links => "links",
            Self::Recommended => "recommended",
            Self::Required => "required",
        }
    }
}

impl std::fmt::Display for PullRequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A LookML project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub git_remote_url: Option<String>,
    #[serde(default)]
    pub pull_request_mode: PullRequestMode,
    #[serde(default)]
    pub validation_required: bool,
}

impl Project {
    /// Bare repositories are hosted by Looker itself and have nothing to test.
    pub fn is_bare_repo(&self) -> bool {
        self.git_remote_url
            .as_deref()
            .is_some_and(|url| url.contains("/bare_models/"))
    }
}

/// A file inside a LookML project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// `model`, `view`, `dashboard`, ...
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
}

impl ProjectFile {
    pub fn is_type(&self, kind: &str) -> bool {
        self.file_type.as_deref() == Some(kind)
    }
}

/// A git connection test available for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConnectionTest {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of running one git connection test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConnectionTestResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// `pass`, `fail` or `warn`
    #[serde(default)]
    pub status: String,
}

impl GitConnectionTestResult {
    pub fn passed(&self) -> bool {
        self.status == "pass"
    }
}
