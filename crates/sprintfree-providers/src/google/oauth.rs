//! OAuth 2.0 console flow for Google APIs.
//!
//! The user is shown the consent URL, authorizes in any browser, and pastes
//! the code Google displays back into the terminal. The code is then
//! exchanged for tokens, which are cached for later runs.

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};

use super::config::{GoogleConfig, OAuthCredentials};
use super::tokens::{TokenInfo, TokenStorage};

/// Line shown before the consent URL.
pub const AUTHORIZE_PROMPT: &str = "Authorize this app by visiting this url: ";

/// Prompt for the pasted authorization code.
pub const CODE_PROMPT: &str = "Enter the code from that page here: ";

/// OAuth client for Google APIs.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    http_client: reqwest::Client,
    auth_url: String,
    token_url: String,
}

/// Token response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    token_type: Option<String>,
    scope: Option<String>,
}

impl OAuthClient {
    /// Creates an OAuth client for the configured credentials and endpoints.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        Ok(Self {
            credentials: config.credentials.clone(),
            http_client: config.http_client()?,
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        })
    }

    /// Builds the consent URL requesting offline access for `scopes`.
    pub fn authorization_url(&self, scopes: &[String]) -> String {
        let scope = scopes.join(" ");
        format!(
            "{}?access_type=offline&scope={}&response_type=code&client_id={}&redirect_uri={}",
            self.auth_url,
            urlencoding::encode(&scope),
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.credentials.redirect_uri),
        )
    }

    /// Runs the console flow: print the consent URL, read one line of
    /// input as the authorization code and exchange it.
    pub async fn authorize_interactive<R, W>(
        &self,
        scopes: &[String],
        input: &mut R,
        output: &mut W,
    ) -> ProviderResult<TokenInfo>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let url = self.authorization_url(scopes);
        let prompt = format!("{}{}\n{}", AUTHORIZE_PROMPT, url, CODE_PROMPT);
        output
            .write_all(prompt.as_bytes())
            .await
            .map_err(|e| ProviderError::internal(format!("failed to write prompt: {}", e)))?;
        output
            .flush()
            .await
            .map_err(|e| ProviderError::internal(format!("failed to write prompt: {}", e)))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .await
            .map_err(|e| ProviderError::internal(format!("failed to read code: {}", e)))?;
        if read == 0 {
            return Err(ProviderError::authentication("no authorization code entered"));
        }

        let code = line.trim();
        debug!("read authorization code ({} chars)", code.len());
        self.exchange_code(code).await
    }

    /// Exchanges an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenInfo> {
        let params = [
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::network(format!("token exchange request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::authentication(format!(
                "token exchange failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::invalid_response(format!("invalid token response: {}", e)))?;

        info!("successfully obtained tokens");
        let mut token = TokenInfo::new(
            token_response.access_token,
            token_response.refresh_token,
            token_response.expires_in,
        );
        if token_response.token_type.is_some() {
            token.token_type = token_response.token_type;
        }
        token.scope = token_response.scope;
        Ok(token)
    }
}

/// Produces an access token, from the cache or from the console flow.
#[derive(Debug)]
pub struct GoogleAuthenticator {
    oauth: OAuthClient,
    storage: TokenStorage,
    scopes: Vec<String>,
}

impl GoogleAuthenticator {
    /// Creates an authenticator for the given configuration.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        config.validate()?;
        Ok(Self {
            oauth: OAuthClient::new(config)?,
            storage: TokenStorage::new(&config.token_path),
            scopes: config.scopes.clone(),
        })
    }

    /// Returns the token cache.
    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    /// Returns a token for API calls.
    ///
    /// A cached token is returned without contacting Google. Otherwise the
    /// console flow runs on `input`/`output` and the new token is cached.
    ///
    /// # Errors
    ///
    /// A malformed cache file is a configuration error. A failed exchange is
    /// an authentication or network error. A cache directory that cannot be
    /// created is fatal.
    pub async fn authorize<R, W>(&self, input: &mut R, output: &mut W) -> ProviderResult<TokenInfo>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(token) = self.storage.load()? {
            return Ok(token);
        }

        info!("no cached token, starting console authorization");
        let token = self
            .oauth
            .authorize_interactive(&self.scopes, input, output)
            .await?;

        self.storage.store(&token)?;
        let notice = format!("Token stored to {}\n", self.storage.path().display());
        output
            .write_all(notice.as_bytes())
            .await
            .map_err(|e| ProviderError::internal(format!("failed to write output: {}", e)))?;

        Ok(token)
    }
}
