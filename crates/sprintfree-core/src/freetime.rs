//! Free working time remaining in a sprint.
//!
//! The calculation walks the events in start order and subtracts each
//! event's duration from the sprint's work-hour budget:
//!
//! - an event of at most 8 hours subtracts its duration
//! - a longer event subtracts exactly 8 hours and marks its start day as
//!   fully consumed
//! - any later event starting on a fully consumed day subtracts nothing
//!
//! Only long events set the marker, so two ordinary events on the same day
//! are both subtracted, even if together they exceed 8 hours.

use tracing::{debug, warn};

use crate::event::CalendarEvent;
use crate::format::format_fixed2;
use crate::sprint::{HOURS_PER_DAY, SprintConfig, SprintPreset};

/// Running state of one free-time pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTimeLedger {
    remaining: f64,
    full_day_subtracted: String,
}

impl FreeTimeLedger {
    /// Starts a ledger with the given work-hour budget.
    pub fn new(work_hours: u32) -> Self {
        Self {
            remaining: f64::from(work_hours),
            full_day_subtracted: String::new(),
        }
    }

    /// Applies one event and returns the hours actually subtracted.
    pub fn record(&mut self, day: &str, duration: f64) -> f64 {
        if day == self.full_day_subtracted {
            debug!(day, "event ignored, day already fully subtracted");
            return 0.0;
        }

        if duration <= HOURS_PER_DAY {
            self.remaining -= duration;
            duration
        } else {
            self.remaining -= HOURS_PER_DAY;
            self.full_day_subtracted = day.to_string();
            debug!(day, "full day event");
            HOURS_PER_DAY
        }
    }

    /// Hours still free.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// The last day marked as fully consumed, empty if none.
    pub fn full_day_subtracted(&self) -> &str {
        &self.full_day_subtracted
    }
}

/// One event line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Start timestamp as returned by the provider.
    pub start: String,
    /// End timestamp as returned by the provider.
    pub end: String,
    /// Duration in hours, `None` when a timestamp could not be read.
    pub duration: Option<f64>,
    /// Hours subtracted from the budget for this event.
    pub subtracted: f64,
    /// Event title.
    pub summary: String,
}

impl ReportEntry {
    /// Duration shown in the report: the duration itself, or 8 when it is
    /// an exact multiple of 8 hours (including zero).
    pub fn effective_hours(&self) -> Option<f64> {
        self.duration.map(|d| {
            if d % HOURS_PER_DAY != 0.0 {
                d
            } else {
                HOURS_PER_DAY
            }
        })
    }
}

/// Result of a free-time pass over a non-empty event list.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTimeReport {
    /// Per-event lines in fetch order.
    pub entries: Vec<ReportEntry>,
    /// Hours left after the fold.
    pub remaining: f64,
    /// Budget the pass started from.
    pub work_hours: u32,
}

impl FreeTimeReport {
    /// Denominator used in the summary.
    ///
    /// Always the three-week budget, whatever preset produced the report.
    pub const REFERENCE_HOURS: u32 = SprintPreset::ThreeWeeks.work_hours();

    /// `remaining` rounded to two decimals, as printed in the summary.
    pub fn remaining_rounded(&self) -> f64 {
        format_fixed2(self.remaining)
            .parse()
            .unwrap_or(self.remaining)
    }

    /// Remaining share in percent, computed from the rounded remaining hours
    /// over [`Self::REFERENCE_HOURS`].
    pub fn percentage(&self) -> f64 {
        self.remaining_rounded() / f64::from(Self::REFERENCE_HOURS) * 100.0
    }
}

/// Folds the events into a report.
///
/// Returns `None` for an empty list: there is nothing to report and the
/// remaining figure is not computed.
pub fn compute_free_time(config: &SprintConfig, events: &[CalendarEvent]) -> Option<FreeTimeReport> {
    if events.is_empty() {
        return None;
    }

    let mut ledger = FreeTimeLedger::new(config.work_hours);
    let mut entries = Vec::with_capacity(events.len());

    for event in events {
        let duration = event.duration_hours();
        let subtracted = match duration {
            Some(hours) => ledger.record(event.start_day(), hours),
            None => {
                warn!(
                    start = %event.start,
                    end = %event.end,
                    "skipping event with unreadable timestamps"
                );
                0.0
            }
        };

        entries.push(ReportEntry {
            start: event.start.clone(),
            end: event.end.clone(),
            duration,
            subtracted,
            summary: event.title().to_string(),
        });
    }

    debug!(
        events = entries.len(),
        remaining = ledger.remaining(),
        "free time computed"
    );

    Some(FreeTimeReport {
        entries,
        remaining: ledger.remaining(),
        work_hours: config.work_hours,
    })
}
