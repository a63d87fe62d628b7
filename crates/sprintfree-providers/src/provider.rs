//! CalendarProvider trait definition.
//!
//! This module defines the [`CalendarProvider`] trait, the seam between the
//! commands and a calendar backend. A provider is handed out already
//! authorized; it only fetches events.

use std::future::Future;
use std::pin::Pin;

use sprintfree_core::{CalendarEvent, TimeWindow};

use crate::error::ProviderResult;

/// Options for fetching events.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Time window to fetch events for. Defaults to "from now on".
    pub time_window: Option<TimeWindow>,
    /// Maximum number of events to return.
    pub max_results: Option<usize>,
    /// Calendar to read instead of the provider's configured one.
    pub calendar_id: Option<String>,
}

impl FetchOptions {
    /// Creates new fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set time window.
    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Builder method to set max results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Builder method to read a specific calendar.
    pub fn with_calendar_id(mut self, id: impl Into<String>) -> Self {
        self.calendar_id = Some(id.into());
        self
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so commands can take
/// `&dyn CalendarProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for calendar providers.
///
/// `fetch_events` issues a single query: single-occurrence events inside
/// the window, ordered by start time. No paging and no retry.
pub trait CalendarProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "google").
    fn name(&self) -> &str;

    /// Fetches events from the calendar.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network errors, authentication failures, etc.
    fn fetch_events(&self, options: FetchOptions)
    -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    struct FixedProvider(Vec<CalendarEvent>);

    impl CalendarProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_events(
            &self,
            options: FetchOptions,
        ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
            Box::pin(async move {
                if options.calendar_id.as_deref() == Some("missing") {
                    return Err(ProviderError::server("no such calendar"));
                }
                let limit = options.max_results.unwrap_or(usize::MAX);
                Ok(self.0.iter().take(limit).cloned().collect())
            })
        }
    }

    #[test]
    fn fetch_options_builder() {
        let now = chrono::Utc::now();
        let options = FetchOptions::new()
            .with_time_window(TimeWindow::new(now, now + chrono::Duration::days(20)))
            .with_max_results(10)
            .with_calendar_id("primary");

        assert!(options.time_window.is_some());
        assert_eq!(options.max_results, Some(10));
        assert_eq!(options.calendar_id.as_deref(), Some("primary"));
    }

    #[tokio::test]
    async fn provider_is_object_safe() {
        let provider: Box<dyn CalendarProvider> = Box::new(FixedProvider(vec![
            CalendarEvent::new("2024-01-01", "2024-01-02"),
            CalendarEvent::new("2024-01-03", "2024-01-04"),
        ]));

        assert_eq!(provider.name(), "fixed");
        let events = provider
            .fetch_events(FetchOptions::new().with_max_results(1))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);

        let err = provider
            .fetch_events(FetchOptions::new().with_calendar_id("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "no such calendar");
    }
}
