//! Profile configuration types for henry.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for storing named connection profiles.
//! - Define `ProfileFile`, the JSON document holding all profiles.
//!
//! Does NOT handle:
//! - Profile merging into a `Config` (see `loader` module).
//!
//! Invariants:
//! - All profile fields are optional to allow partial profile definitions.
//! - Unknown fields in the file are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::loader::ConfigError;
use crate::types::auth::secret_string;

/// Optional secret wrapper so profile secrets serialize as plain strings.
mod opt_secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match secret {
            Some(s) => super::secret_string::serialize(s, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| SecretString::new(s.into())))
    }
}

/// A named connection profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Base URL of the Looker API host
    pub base_url: Option<String>,
    /// API3 client id
    pub client_id: Option<String>,
    /// API3 client secret
    #[serde(with = "opt_secret_string", skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretString>,
    /// Pre-issued access token
    #[serde(with = "opt_secret_string", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<SecretString>,
    /// Whether to verify TLS certificates
    pub verify_ssl: Option<bool>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// API version segment
    pub api_version: Option<String>,
}

/// On-disk profile file: `{ "profiles": { "<name>": { ... } } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFile {
    pub profiles: BTreeMap<String, ProfileConfig>,
}

impl ProfileFile {
    /// Read and parse a profile file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::ConfigFileRead {
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&content).map_err(|_| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
        })
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_profile_file_parses_partial_profiles() {
        let json = r#"{
            "profiles": {
                "prod": {
                    "base_url": "https://looker.example.com:19999",
                    "client_id": "id",
                    "client_secret": "secret"
                },
                "minimal": {}
            }
        }"#;

        let file: ProfileFile = serde_json::from_str(json).unwrap();
        let prod = file.profile("prod").unwrap();
        assert_eq!(prod.client_id.as_deref(), Some("id"));
        assert_eq!(
            prod.client_secret.as_ref().map(|s| s.expose_secret().to_string()),
            Some("secret".to_string())
        );
        assert!(file.profile("minimal").unwrap().base_url.is_none());
        assert!(file.profile("missing").is_none());
    }

    #[test]
    fn test_read_reports_parse_error_with_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();

        let err = ProfileFile::read(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileParse { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = ProfileFile::read(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileRead { .. }));
    }
}
