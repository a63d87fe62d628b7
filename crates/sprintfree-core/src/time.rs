//! Time helpers for calendar events.
//!
//! This module provides [`parse_event_timestamp`] for reading the start/end
//! strings a provider returns (which may be either a datetime or an all-day
//! date), [`duration_hours`] for the hour difference between two of them,
//! and [`TimeWindow`] for defining query ranges.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Parses a provider timestamp without attaching any timezone to the result.
///
/// Accepted forms:
/// - RFC 3339 with an offset (`2024-01-01T09:00:00+02:00`, `...Z`), converted to UTC
/// - a datetime without an offset (`2024-01-01T09:00:00`), taken as-is
/// - a date-only value (`2024-01-01`), taken as midnight
pub fn parse_event_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Returns the number of hours between two provider timestamps.
///
/// The difference is taken in milliseconds and divided by 3 600 000, so
/// fractional hours are kept. Returns `None` when either side fails to parse.
pub fn duration_hours(start: &str, end: &str) -> Option<f64> {
    let start = parse_event_timestamp(start)?;
    let end = parse_event_timestamp(end)?;
    let millis = (end - start).num_milliseconds();
    Some(millis as f64 / MILLIS_PER_HOUR)
}

/// A time window for querying calendar events.
///
/// Represents `[start, end)` in UTC. An absent `end` leaves the window open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive), if bounded.
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Creates a bounded time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self {
            start,
            end: Some(end),
        }
    }

    /// Creates a window with no upper bound.
    pub fn open_ended(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// Creates a window from `now` to the same wall-clock time `days` calendar
    /// days later in the local timezone.
    ///
    /// Falls back to adding `days * 24h` when the local date arithmetic
    /// lands outside chrono's representable range.
    pub fn lookahead_days(now: DateTime<Local>, days: u32) -> Self {
        let end = now
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or_else(|| now + chrono::Duration::days(i64::from(days)));
        Self::new(now.with_timezone(&Utc), end.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn rfc3339_utc() {
            assert_eq!(
                parse_event_timestamp("2024-01-01T09:00:00Z"),
                Some(naive(2024, 1, 1, 9, 0))
            );
        }

        #[test]
        fn rfc3339_with_offset_is_normalized() {
            assert_eq!(
                parse_event_timestamp("2024-01-01T09:00:00+02:00"),
                Some(naive(2024, 1, 1, 7, 0))
            );
        }

        #[test]
        fn datetime_without_offset() {
            assert_eq!(
                parse_event_timestamp("2024-01-01T09:30:00"),
                Some(naive(2024, 1, 1, 9, 30))
            );
        }

        #[test]
        fn date_only_is_midnight() {
            assert_eq!(
                parse_event_timestamp("2024-03-15"),
                Some(naive(2024, 3, 15, 0, 0))
            );
        }

        #[test]
        fn garbage_is_rejected() {
            assert_eq!(parse_event_timestamp("tomorrow"), None);
            assert_eq!(parse_event_timestamp(""), None);
        }
    }

    mod durations {
        use super::*;

        #[test]
        fn full_working_day() {
            let hours = duration_hours("2024-01-01T09:00:00Z", "2024-01-01T17:00:00Z");
            assert_eq!(hours, Some(8.0));
        }

        #[test]
        fn fractional_hours() {
            let hours = duration_hours("2024-01-01T09:00:00Z", "2024-01-01T12:30:00Z");
            assert_eq!(hours, Some(3.5));
        }

        #[test]
        fn across_offsets() {
            // Same instant expressed in two offsets: one hour apart.
            let hours = duration_hours("2024-01-01T09:00:00+01:00", "2024-01-01T09:00:00Z");
            assert_eq!(hours, Some(1.0));
        }

        #[test]
        fn all_day_event() {
            assert_eq!(duration_hours("2024-01-01", "2024-01-02"), Some(24.0));
            assert_eq!(duration_hours("2024-01-01", "2024-01-04"), Some(72.0));
        }

        #[test]
        fn zero_length() {
            let hours = duration_hours("2024-01-01T09:00:00Z", "2024-01-01T09:00:00Z");
            assert_eq!(hours, Some(0.0));
        }

        #[test]
        fn unparseable_side() {
            assert_eq!(duration_hours("2024-01-01", "soon"), None);
        }
    }

    mod time_window {
        use super::*;

        #[test]
        fn bounded_window() {
            let window = TimeWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0));
            assert_eq!(window.start, utc(2025, 2, 5, 9, 0, 0));
            assert_eq!(window.end, Some(utc(2025, 2, 5, 17, 0, 0)));
        }

        #[test]
        fn open_ended_window() {
            let window = TimeWindow::open_ended(utc(2025, 2, 5, 9, 0, 0));
            assert!(window.end.is_none());
        }

        #[test]
        #[should_panic(expected = "start must be <= end")]
        fn invalid_window() {
            TimeWindow::new(utc(2025, 2, 5, 17, 0, 0), utc(2025, 2, 5, 9, 0, 0));
        }

        #[test]
        fn lookahead_spans_requested_days() {
            let now = Local::now();
            let window = TimeWindow::lookahead_days(now, 20);
            let end = window.end.unwrap();
            assert_eq!(window.start, now.with_timezone(&Utc));

            // A DST transition inside the window shifts the span by at most an hour.
            let span = end - window.start;
            assert!((span - chrono::Duration::days(20)).num_minutes().abs() <= 60);
        }

        #[test]
        fn serde_roundtrip() {
            let window = TimeWindow::new(utc(2025, 2, 5, 9, 0, 0), utc(2025, 2, 5, 17, 0, 0));
            let json = serde_json::to_string(&window).unwrap();
            let parsed: TimeWindow = serde_json::from_str(&json).unwrap();
            assert_eq!(window, parsed);
        }
    }
}
