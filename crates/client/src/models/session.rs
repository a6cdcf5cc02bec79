//! API session and login models.

use serde::{Deserialize, Serialize};

/// Response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// The API session's active workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSession {
    pub workspace_id: String,
}

/// Workspaces a session can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workspace {
    Dev,
    Production,
}

impl Workspace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Production => "production",
        }
    }
}
