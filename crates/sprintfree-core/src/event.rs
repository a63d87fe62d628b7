//! Calendar event as seen by the free-time calculation.

use serde::{Deserialize, Serialize};

use crate::time::duration_hours;

/// Placeholder shown when an event has no summary.
pub const UNTITLED: &str = "(No title)";

/// A single event returned by a provider.
///
/// Start and end keep the exact strings the provider sent (a datetime, or a
/// date for all-day events), since the report echoes them verbatim and the
/// same-day rule looks at their first ten characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Start timestamp as returned by the provider.
    pub start: String,
    /// End timestamp as returned by the provider.
    pub end: String,
    /// Event title, if any.
    pub summary: Option<String>,
}

impl CalendarEvent {
    /// Creates a new event.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            summary: None,
        }
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Duration in hours, or `None` if either timestamp is unreadable.
    pub fn duration_hours(&self) -> Option<f64> {
        duration_hours(&self.start, &self.end)
    }

    /// The date portion of the start timestamp (its first ten characters).
    pub fn start_day(&self) -> &str {
        match self.start.char_indices().nth(10) {
            Some((idx, _)) => &self.start[..idx],
            None => &self.start,
        }
    }

    /// The summary, or a placeholder for untitled events.
    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or(UNTITLED)
    }
}
