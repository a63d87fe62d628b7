//! Authorization step shared by every command.

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::info;

use sprintfree_providers::google::{GoogleConfig, GoogleProvider};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Loads the client secret and returns an authorized Google provider,
/// prompting on the terminal when no token is cached.
pub async fn google(config: &ClientConfig) -> ClientResult<GoogleProvider> {
    let google_config = config.to_google_config()?;
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    authorize(&google_config, &mut stdin, &mut stdout).await
}

/// Runs authorization against explicit console streams.
pub async fn authorize<R, W>(
    google_config: &GoogleConfig,
    input: &mut R,
    output: &mut W,
) -> ClientResult<GoogleProvider>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let provider = GoogleProvider::authorize(google_config, input, output)
        .await
        .map_err(ClientError::from_authorization)?;
    info!("authorized with Google Calendar");
    Ok(provider)
}
