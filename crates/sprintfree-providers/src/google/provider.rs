//! Google Calendar provider implementation.
//!
//! This module implements the [`CalendarProvider`] trait for Google Calendar.

use chrono::Utc;
use sprintfree_core::{CalendarEvent, TimeWindow};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

use crate::error::ProviderResult;
use crate::provider::{BoxFuture, CalendarProvider, FetchOptions};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use super::oauth::GoogleAuthenticator;
use super::tokens::TokenInfo;

const PROVIDER_NAME: &str = "google";

/// Google Calendar provider.
///
/// Holds an API client bound to one access token. Build it with
/// [`GoogleProvider::authorize`] to go through the token cache and the
/// console flow first.
#[derive(Debug)]
pub struct GoogleProvider {
    calendar_id: String,
    client: GoogleCalendarClient,
}

impl GoogleProvider {
    /// Creates a provider using an already obtained token.
    pub fn new(config: &GoogleConfig, token: &TokenInfo) -> ProviderResult<Self> {
        let client = GoogleCalendarClient::new(
            config.http_client()?,
            &token.access_token,
            &config.api_base,
        );
        Ok(Self {
            calendar_id: config.calendar_id.clone(),
            client,
        })
    }

    /// Obtains a token (cached, or via the console flow on `input`/`output`)
    /// and returns a provider using it.
    pub async fn authorize<R, W>(
        config: &GoogleConfig,
        input: &mut R,
        output: &mut W,
    ) -> ProviderResult<Self>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let authenticator = GoogleAuthenticator::new(config)?;
        let token = authenticator
            .authorize(input, output)
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Self::new(config, &token)
    }

    async fn fetch_impl(&self, options: FetchOptions) -> ProviderResult<Vec<CalendarEvent>> {
        let window = options
            .time_window
            .unwrap_or_else(|| TimeWindow::open_ended(Utc::now()));
        let calendar_id = options.calendar_id.as_deref().unwrap_or(&self.calendar_id);
        debug!(
            "fetching events from {} between {} and {:?}",
            calendar_id, window.start, window.end
        );

        self.client
            .list_events(calendar_id, window.start, window.end, options.max_results)
            .await
            .map_err(|e| e.with_provider(PROVIDER_NAME))
    }
}

impl CalendarProvider for GoogleProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_events(&self, options: FetchOptions) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        Box::pin(self.fetch_impl(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::google::config::OAuthCredentials;
    use chrono::TimeZone;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, token_path: &std::path::Path) -> GoogleConfig {
        GoogleConfig::new(OAuthCredentials::new("id", "secret", "urn:ietf:wg:oauth:2.0:oob"))
            .with_token_path(token_path)
            .with_endpoints(
                format!("{}/auth", server.uri()),
                format!("{}/token", server.uri()),
                format!("{}/calendar/v3", server.uri()),
            )
    }

    #[tokio::test]
    async fn provider_name() {
        let server = MockServer::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server, &tmp.path().join("t.json"));
        let provider = GoogleProvider::new(&config, &TokenInfo::new("tok", None, None)).unwrap();
        assert_eq!(provider.name(), "google");
    }

    #[tokio::test]
    async fn fetch_uses_cached_token_and_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("authorization", "Bearer cached-token"))
            .and(query_param("timeMin", "2024-03-04T00:00:00.000Z"))
            .and(query_param("timeMax", "2024-03-24T00:00:00.000Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "summary": "Review",
                    "start": {"dateTime": "2024-03-05T10:00:00Z"},
                    "end": {"dateTime": "2024-03-05T12:00:00Z"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let token_path = tmp.path().join("t.json");
        std::fs::write(&token_path, r#"{"access_token":"cached-token"}"#).unwrap();
        let config = test_config(&server, &token_path);

        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let provider = GoogleProvider::authorize(&config, &mut input, &mut output)
            .await
            .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, start + chrono::Duration::days(20));
        let events = provider
            .fetch_events(FetchOptions::new().with_time_window(window))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Review");
    }

    #[tokio::test]
    async fn fetch_sends_configured_user_agent() {
        let server = MockServer::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server, &tmp.path().join("t.json"));
        Mock::given(method("GET"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("user-agent", config.user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleProvider::new(&config, &TokenInfo::new("tok", None, None)).unwrap();
        let events = provider.fetch_events(FetchOptions::new()).await.unwrap();
        assert!(events.is_empty());
        assert!(config.user_agent.starts_with("sprintfree/"));
    }

    #[tokio::test]
    async fn fetch_errors_carry_provider_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&server, &tmp.path().join("t.json"));
        let provider = GoogleProvider::new(&config, &TokenInfo::new("stale", None, None)).unwrap();

        let err = provider.fetch_events(FetchOptions::new()).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::AuthenticationFailed);
        assert_eq!(err.provider(), Some("google"));
    }
}
