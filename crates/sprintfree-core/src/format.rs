//! Plain-text rendering of the free-time report and the upcoming-events
//! listing.
//!
//! Renderers return lines; the caller decides where they go.

use crate::event::CalendarEvent;
use crate::freetime::FreeTimeReport;

/// Printed when the provider returns no events.
pub const NO_EVENTS_TEXT: &str = "No upcoming events found.";

/// Formats an hour count the way a plain number prints: no trailing `.0`,
/// shortest round-trip digits, and no negative zero.
pub fn format_hours(hours: f64) -> String {
    if hours == 0.0 {
        "0".to_string()
    } else {
        hours.to_string()
    }
}

/// Fractional digits needed to print any `f64` without rounding.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Formats `value` with two decimals, rounding half away from zero.
///
/// Rounding applies to the exact binary value, so `0.995` (stored just
/// below the tie) gives `0.99` while `111.625` (an exact tie) gives
/// `111.63`. Negative zero prints as `0.00`.
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let fraction = fraction.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..2).map(|i| fraction.get(i).copied().unwrap_or(b'0')));

    if fraction.get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(*d)));
    out.push('.');
    out.extend(digits[split..].iter().map(|d| char::from(*d)));
    out
}

/// Renders the free-time report.
///
/// ```text
/// Upcoming events:
/// 2024-01-01T09:00:00Z - 2024-01-01T12:30:00Z - 3.5 - Planning
/// freeTimeHours: 108.50 over: 112 %: 96.875
/// ```
pub fn render_free_time(report: &FreeTimeReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.entries.len() + 2);
    lines.push("Upcoming events:".to_string());

    for entry in &report.entries {
        let shown = entry
            .effective_hours()
            .map(format_hours)
            .unwrap_or_else(|| "?".to_string());
        lines.push(format!(
            "{} - {} - {} - {}",
            entry.start, entry.end, shown, entry.summary
        ));
    }

    lines.push(format!(
        "freeTimeHours: {} over: {} %: {}",
        format_fixed2(report.remaining),
        FreeTimeReport::REFERENCE_HOURS,
        format_hours(report.percentage())
    ));
    lines
}

/// Renders the upcoming-events listing used by the `list` command.
pub fn render_upcoming(events: &[CalendarEvent], limit: usize) -> Vec<String> {
    if events.is_empty() {
        return vec![NO_EVENTS_TEXT.to_string()];
    }

    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(format!("Upcoming {} events:", limit));
    lines.extend(
        events
            .iter()
            .map(|event| format!("{} - {}", event.start, event.title())),
    );
    lines
}
