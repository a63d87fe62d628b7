//! Google Calendar provider implementation.
//!
//! # Authentication Flow
//!
//! 1. The client secret is read from `client_secret.json`
//! 2. A token cached in `~/.credentials/` is used as-is when present
//! 3. Otherwise the consent URL is printed and the user pastes back the code
//! 4. The code is exchanged for tokens, which are cached for later runs
//!
//! # Example
//!
//! ```ignore
//! use sprintfree_providers::google::{GoogleConfig, GoogleProvider, OAuthCredentials};
//!
//! let credentials = OAuthCredentials::from_file("client_secret.json")?;
//! let config = GoogleConfig::new(credentials);
//! let provider = GoogleProvider::authorize(&config, &mut stdin, &mut stdout).await?;
//! let events = provider.fetch_events(FetchOptions::new()).await?;
//! ```

mod client;
mod config;
mod oauth;
mod provider;
mod tokens;

pub use client::GoogleCalendarClient;
pub use config::{
    DEFAULT_CREDENTIALS_FILE, GoogleConfig, OAuthCredentials, TOKEN_DIR_NAME, TOKEN_FILE_NAME,
};
pub use oauth::{AUTHORIZE_PROMPT, CODE_PROMPT, GoogleAuthenticator, OAuthClient};
pub use provider::GoogleProvider;
pub use tokens::{TokenInfo, TokenStorage};
