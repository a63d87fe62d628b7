//! Upcoming-events listing.

use chrono::{DateTime, Local, Utc};

use sprintfree_core::{TimeWindow, render_upcoming};
use sprintfree_providers::{CalendarProvider, FetchOptions};

use crate::error::ClientResult;

/// Number of events shown by the listing.
pub const LIST_LIMIT: usize = 10;

/// Prints the next [`LIST_LIMIT`] events starting at `now`.
pub async fn run(provider: &dyn CalendarProvider, now: DateTime<Local>) -> ClientResult<()> {
    for line in lines(provider, now).await? {
        println!("{}", line);
    }
    Ok(())
}

/// Builds the listing lines.
pub async fn lines(provider: &dyn CalendarProvider, now: DateTime<Local>) -> ClientResult<Vec<String>> {
    let options = FetchOptions::new()
        .with_time_window(TimeWindow::open_ended(now.with_timezone(&Utc)))
        .with_max_results(LIST_LIMIT);
    let events = provider.fetch_events(options).await?;
    Ok(render_upcoming(&events, LIST_LIMIT))
}
