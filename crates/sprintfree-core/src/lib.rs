//! Core types: sprint presets, events, free-time calculation, formatting

pub mod event;
pub mod format;
pub mod freetime;
pub mod sprint;
pub mod time;
pub mod tracing;

pub use event::CalendarEvent;
pub use format::{NO_EVENTS_TEXT, format_fixed2, format_hours, render_free_time, render_upcoming};
pub use freetime::{FreeTimeLedger, FreeTimeReport, ReportEntry, compute_free_time};
pub use sprint::{HOURS_PER_DAY, SprintConfig, SprintPreset};
pub use time::{TimeWindow, duration_hours, parse_event_timestamp};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
