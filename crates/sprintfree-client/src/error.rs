//! Client error types.
//!
//! Every error ends the run after its message is printed. Only
//! [`ClientError::Fatal`] turns into a failure exit status.

use std::fmt;

use sprintfree_providers::{ProviderError, ProviderErrorCode};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Exit status of a finished run. Only fatal errors fail the process.
pub fn exit_status(result: &ClientResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e.exit_status(),
    }
}

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The OAuth client secret file could not be loaded.
    Credentials(String),
    /// The authorization code could not be exchanged for a token.
    Authorization(String),
    /// The calendar API call failed.
    Provider(String),
    /// Unrecoverable error; the process exits with a failure status.
    Fatal(String),
}

impl ClientError {
    /// Returns true if this error must produce a failure exit status.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Process exit status for this error: 1 when fatal, 0 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.is_fatal() { 1 } else { 0 }
    }

    /// Classifies an error raised while obtaining a token.
    pub fn from_authorization(err: ProviderError) -> Self {
        if err.is_fatal() {
            Self::Fatal(err.to_string())
        } else if err.code() == ProviderErrorCode::ConfigurationError {
            Self::Config(err.message().to_string())
        } else {
            Self::Authorization(err.to_string())
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Credentials(msg) => write!(f, "Error loading client secret file: {}", msg),
            Self::Authorization(msg) => {
                write!(f, "Error while trying to retrieve access token {}", msg)
            }
            Self::Provider(msg) => write!(f, "The API returned an error: {}", msg),
            Self::Fatal(msg) => write!(f, "fatal: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        if err.is_fatal() {
            Self::Fatal(err.to_string())
        } else {
            Self::Provider(err.to_string())
        }
    }
}
