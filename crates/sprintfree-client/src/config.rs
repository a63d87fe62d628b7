//! Client configuration.
//!
//! All settings live in an optional `config.toml` at
//! `~/.config/sprintfree/config.toml` by default. Every key has a default,
//! so a missing file behaves like an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sprintfree_core::{SprintConfig, SprintPreset};
use sprintfree_providers::google::{DEFAULT_CREDENTIALS_FILE, GoogleConfig, OAuthCredentials};

use crate::error::{ClientError, ClientResult};

/// Configuration for the sprintfree client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sprint preset used by the free-time report.
    pub sprint: SprintPreset,

    /// Path to the OAuth client descriptor. Defaults to `client_secret.json`
    /// in the working directory.
    pub credentials_file: Option<PathBuf>,

    /// Path of the token cache. Defaults to
    /// `~/.credentials/calendar-nodejs-quickstart.json`.
    pub token_path: Option<PathBuf>,

    /// Calendar to read. Defaults to `primary`.
    pub calendar_id: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path, if the file exists.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default config file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default config directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sprintfree")
    }

    /// Returns the sprint window and budget for the free-time report.
    pub fn sprint_config(&self) -> SprintConfig {
        SprintConfig::from_preset(self.sprint)
    }

    /// Returns the credentials file path to read.
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
    }

    /// Reads the client secret and builds the Google provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Credentials`] when the credentials file is
    /// missing or malformed.
    pub fn to_google_config(&self) -> ClientResult<GoogleConfig> {
        let credentials = OAuthCredentials::from_file(self.credentials_path())
            .map_err(|e| ClientError::Credentials(e.message().to_string()))?;

        let mut config = GoogleConfig::new(credentials);
        if let Some(ref path) = self.token_path {
            config = config.with_token_path(path);
        }
        if let Some(ref id) = self.calendar_id {
            config = config.with_calendar_id(id);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIALS: &str = r#"{
        "installed": {
            "client_id": "id.apps.googleusercontent.com",
            "client_secret": "secret",
            "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
        }
    }"#;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ClientConfig::parse("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.sprint, SprintPreset::ThreeWeeks);
        assert_eq!(config.credentials_path(), PathBuf::from("client_secret.json"));

        let sprint = config.sprint_config();
        assert_eq!(sprint.days, 20);
        assert_eq!(sprint.work_hours, 112);
    }

    #[test]
    fn config_toml_with_all_keys() {
        let config = ClientConfig::parse(
            r#"
            sprint = "two_weeks"
            credentials_file = "/etc/sprintfree/client_secret.json"
            token_path = "/tmp/token.json"
            calendar_id = "team@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.sprint, SprintPreset::TwoWeeks);
        assert_eq!(config.sprint_config().work_hours, 104);
        assert_eq!(
            config.credentials_path(),
            PathBuf::from("/etc/sprintfree/client_secret.json")
        );
        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/token.json")));
        assert_eq!(config.calendar_id.as_deref(), Some("team@example.com"));
    }

    #[test]
    fn config_toml_rejects_unknown_preset() {
        let err = ClientConfig::parse(r#"sprint = "four_weeks""#).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&tmp.path().join("config.toml")).unwrap_err();
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn to_google_config_reads_credentials() {
        let tmp = tempfile::tempdir().unwrap();
        let secret = tmp.path().join("client_secret.json");
        std::fs::write(&secret, CREDENTIALS).unwrap();

        let config = ClientConfig {
            credentials_file: Some(secret),
            token_path: Some(tmp.path().join("token.json")),
            calendar_id: Some("team@example.com".to_string()),
            ..Default::default()
        };
        let google = config.to_google_config().unwrap();

        assert_eq!(google.credentials.client_id, "id.apps.googleusercontent.com");
        assert_eq!(google.credentials.redirect_uri, "urn:ietf:wg:oauth:2.0:oob");
        assert_eq!(google.token_path, tmp.path().join("token.json"));
        assert_eq!(google.calendar_id, "team@example.com");
    }

    #[test]
    fn to_google_config_missing_credentials() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            credentials_file: Some(tmp.path().join("client_secret.json")),
            ..Default::default()
        };

        let err = config.to_google_config().unwrap_err();
        assert!(matches!(err, ClientError::Credentials(_)));
        assert!(err.to_string().starts_with("Error loading client secret file: "));
    }
}
