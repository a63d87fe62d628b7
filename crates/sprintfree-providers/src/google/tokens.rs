//! OAuth token cache.
//!
//! The cache is a single JSON file in the provider's token format. A token
//! found there is used as-is: there is no expiry check and no refresh, so a
//! stale token surfaces as an authentication error on the first API call.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult};

/// An OAuth token set, in the layout Google client libraries persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token, present when offline access was granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token type, normally `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Space-separated scopes that were granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Access token expiry in milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
}

impl TokenInfo {
    /// Creates a token from the fields of a token endpoint response.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            token_type: Some("Bearer".to_string()),
            scope: None,
            expiry_date: expires_in_secs.map(|secs| Utc::now().timestamp_millis() + secs * 1000),
        }
    }
}

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Creates a token cache at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the token storage path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached token.
    ///
    /// Any read failure (missing file, permissions) counts as "no token" and
    /// returns `Ok(None)`. A file that reads but does not parse is an error.
    pub fn load(&self) -> ProviderResult<Option<TokenInfo>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("no usable token file at {:?}: {}", self.path, e);
                return Ok(None);
            }
        };

        let token: TokenInfo = serde_json::from_str(&content).map_err(|e| {
            ProviderError::configuration(format!(
                "failed to parse token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!("loaded token from {:?}", self.path);
        Ok(Some(token))
    }

    /// Writes a token to the cache.
    ///
    /// The parent directory is created if missing (one level only). An
    /// existing directory is fine; any other failure to create it is fatal.
    /// A failure writing the file itself is logged and otherwise ignored.
    pub fn store(&self, token: &TokenInfo) -> ProviderResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            match fs::create_dir(parent) {
                Ok(()) => debug!("created token directory {:?}", parent),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => {
                    return Err(ProviderError::token_directory(format!(
                        "failed to create token directory {}: {}",
                        parent.display(),
                        e
                    ))
                    .with_source(e));
                }
            }
        }

        let content = serde_json::to_string(token)
            .map_err(|e| ProviderError::internal(format!("failed to serialize token: {}", e)))?;

        match fs::write(&self.path, content) {
            Ok(()) => {
                // Owner-only on Unix.
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
                }
                debug!("saved token to {:?}", self.path);
            }
            Err(e) => warn!("failed to write token file {:?}: {}", self.path, e),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    fn sample_token() -> TokenInfo {
        TokenInfo {
            access_token: "ya29.access".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            token_type: Some("Bearer".to_string()),
            scope: None,
            expiry_date: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn token_from_response_fields() {
        let before = Utc::now().timestamp_millis();
        let token = TokenInfo::new("access", Some("refresh".to_string()), Some(3600));
        assert_eq!(token.access_token, "access");
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        let expiry = token.expiry_date.unwrap();
        assert!(expiry >= before + 3_600_000);
    }

    #[test]
    fn token_parses_library_layout() {
        let json = r#"{
            "access_token": "ya29.a0",
            "refresh_token": "1//0g",
            "token_type": "Bearer",
            "expiry_date": 1489150876519,
            "id_token": "ignored"
        }"#;
        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "ya29.a0");
        assert_eq!(token.expiry_date, Some(1_489_150_876_519));
    }

    #[test]
    fn store_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".credentials").join("token.json");
        let storage = TokenStorage::new(&path);

        storage.store(&sample_token()).unwrap();
        assert!(path.exists());
        assert_eq!(storage.load().unwrap(), Some(sample_token()));
    }

    #[test]
    fn store_accepts_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        fs::write(&path, "stale").unwrap();

        TokenStorage::new(&path).store(&sample_token()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("ya29.access"));
    }

    #[test]
    fn store_fails_fatally_when_directory_cannot_be_created() {
        let tmp = tempfile::tempdir().unwrap();
        // Parent of the parent does not exist: single-level creation fails.
        let path = tmp.path().join("a").join("b").join("token.json");

        let err = TokenStorage::new(&path).store(&sample_token()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::TokenDirectory);
        assert!(err.is_fatal());
    }

    #[test]
    fn store_ignores_file_write_failure() {
        let tmp = tempfile::tempdir().unwrap();
        // The token path is itself a directory, so writing the file fails.
        let path = tmp.path().join("token.json");
        fs::create_dir(&path).unwrap();

        assert!(TokenStorage::new(&path).store(&sample_token()).is_ok());
    }

    #[test]
    fn load_missing_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(tmp.path().join("absent.json"));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn load_malformed_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        fs::write(&path, "{ not json").unwrap();

        let err = TokenStorage::new(&path).load().unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
    }

    #[test]
    fn expired_token_is_returned_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        fs::write(&path, r#"{"access_token":"old","expiry_date":1}"#).unwrap();

        let token = TokenStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(token.access_token, "old");
        assert_eq!(token.expiry_date, Some(1));
    }
}
