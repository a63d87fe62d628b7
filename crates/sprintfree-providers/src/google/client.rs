//! Google Calendar API client.
//!
//! A thin wrapper over the `events.list` endpoint returning
//! [`CalendarEvent`]s with their start and end kept verbatim.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use sprintfree_core::CalendarEvent;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
    api_base: String,
}

impl GoogleCalendarClient {
    /// Creates a client sending requests through `http_client`, authorized
    /// with `access_token`.
    pub fn new(
        http_client: reqwest::Client,
        access_token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            access_token: access_token.into(),
            api_base: api_base.into(),
        }
    }

    /// Lists single-occurrence events of a calendar ordered by start time.
    ///
    /// Only the first result page is read.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: Option<DateTime<Utc>>,
        max_results: Option<usize>,
    ) -> ProviderResult<Vec<CalendarEvent>> {
        let url = format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        );

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", format_timestamp(time_min)),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]);

        if let Some(max) = time_max {
            request = request.query(&[("timeMax", format_timestamp(max))]);
        }

        if let Some(max) = max_results {
            request = request.query(&[("maxResults", max.to_string())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::network("request timeout")
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e))
            } else {
                ProviderError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication("access token expired or invalid"));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::authorization("access denied to calendar"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let list: EventListResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        if let Some(ref token) = list.next_page_token {
            debug!("ignoring further result pages (nextPageToken {})", token);
        }

        let events: Vec<CalendarEvent> = list.items.into_iter().filter_map(convert_event).collect();
        debug!("fetched {} events from calendar {}", events.len(), calendar_id);
        Ok(events)
    }
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts an API event, keeping `dateTime` or else `date` verbatim.
fn convert_event(event: ApiEvent) -> Option<CalendarEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id.as_deref().unwrap_or("<unknown>");
    let Some(start) = event.start.and_then(ApiEventTime::into_value) else {
        warn!("event {} has no start time", id);
        return None;
    };
    let Some(end) = event.end.and_then(ApiEventTime::into_value) else {
        warn!("event {} has no end time", id);
        return None;
    };

    let calendar_event = CalendarEvent::new(start, end);
    Some(match event.summary {
        Some(summary) => calendar_event.with_summary(summary),
        None => calendar_event,
    })
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// Event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    status: Option<String>,
    summary: Option<String>,
    start: Option<ApiEventTime>,
    end: Option<ApiEventTime>,
}

/// Event time from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

impl ApiEventTime {
    fn into_value(self) -> Option<String> {
        self.date_time.or(self.date)
    }
}
