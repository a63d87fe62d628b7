//! Google Calendar provider configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};

/// File the client secret is read from, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "client_secret.json";

/// Directory under `$HOME` holding the token cache.
pub const TOKEN_DIR_NAME: &str = ".credentials";

/// Token cache file name inside [`TOKEN_DIR_NAME`].
pub const TOKEN_FILE_NAME: &str = "calendar-nodejs-quickstart.json";

/// OAuth 2.0 client credentials for Google API access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
    /// Where Google sends the user after consent; the first registered URI.
    pub redirect_uri: String,
}

/// Structure of Google's OAuth client descriptor (`client_secret.json`).
#[derive(Debug, Deserialize)]
struct GoogleCredentialsFile {
    installed: Option<NestedCredentials>,
    web: Option<NestedCredentials>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl OAuthCredentials {
    /// Creates new OAuth credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Loads OAuth credentials from a Google Cloud Console JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::configuration(format!("{}: {}", path.display(), e)).with_source(e)
        })?;
        Self::from_json(&content)
    }

    /// Parses OAuth credentials from a Google client descriptor.
    ///
    /// The `installed` section is used when present, `web` otherwise.
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let file: GoogleCredentialsFile = serde_json::from_str(json).map_err(|e| {
            ProviderError::configuration(format!("failed to parse credentials JSON: {}", e))
        })?;

        let creds = file.installed.or(file.web).ok_or_else(|| {
            ProviderError::configuration("credentials file must contain an 'installed' section")
        })?;

        let redirect_uri = creds.redirect_uris.into_iter().next().ok_or_else(|| {
            ProviderError::configuration("credentials file lists no redirect_uris")
        })?;

        Ok(Self::new(creds.client_id, creds.client_secret, redirect_uri))
    }
}

/// Configuration for the Google Calendar provider.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth credentials for API access.
    pub credentials: OAuthCredentials,

    /// Path of the cached token.
    ///
    /// Defaults to `~/.credentials/calendar-nodejs-quickstart.json`.
    pub token_path: PathBuf,

    /// Calendar to read. Defaults to `"primary"`.
    pub calendar_id: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,

    /// OAuth scopes to request.
    ///
    /// Defaults to `["https://www.googleapis.com/auth/calendar.readonly"]`.
    pub scopes: Vec<String>,

    /// Consent page users are sent to.
    pub auth_url: String,

    /// Endpoint exchanging authorization codes for tokens.
    pub token_url: String,

    /// Base URL of the Calendar API.
    pub api_base: String,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default OAuth scope for read-only calendar access.
    pub const DEFAULT_SCOPE: &'static str = "https://www.googleapis.com/auth/calendar.readonly";

    /// Google's consent page.
    pub const GOOGLE_AUTH_URL: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";

    /// Google's token endpoint.
    pub const GOOGLE_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// Base URL for Google Calendar API v3.
    pub const CALENDAR_API_BASE: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Creates a new Google configuration with the given credentials.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            token_path: Self::default_token_path(),
            calendar_id: "primary".to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("sprintfree/{}", env!("CARGO_PKG_VERSION")),
            scopes: vec![Self::DEFAULT_SCOPE.to_string()],
            auth_url: Self::GOOGLE_AUTH_URL.to_string(),
            token_url: Self::GOOGLE_TOKEN_URL.to_string(),
            api_base: Self::CALENDAR_API_BASE.to_string(),
        }
    }

    /// Returns the default token cache path, `~/.credentials/calendar-nodejs-quickstart.json`.
    pub fn default_token_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TOKEN_DIR_NAME)
            .join(TOKEN_FILE_NAME)
    }

    /// Sets the token storage path.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Sets the calendar to read.
    pub fn with_calendar_id(mut self, id: impl Into<String>) -> Self {
        self.calendar_id = id.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the OAuth scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Points the OAuth and Calendar endpoints at another host.
    pub fn with_endpoints(
        mut self,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self.api_base = api_base.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ProviderResult<()> {
        if self.credentials.client_id.is_empty() {
            return Err(ProviderError::configuration("client_id is required"));
        }
        if self.scopes.is_empty() {
            return Err(ProviderError::configuration(
                "at least one OAuth scope is required",
            ));
        }
        if self.calendar_id.is_empty() {
            return Err(ProviderError::configuration("calendar id is required"));
        }
        Ok(())
    }

    /// Builds the HTTP client shared by the OAuth and Calendar calls.
    pub(crate) fn http_client(&self) -> ProviderResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })
    }
}
