//! Sprint free-time report.

use chrono::{DateTime, Local};
use tracing::debug;

use sprintfree_core::{NO_EVENTS_TEXT, SprintConfig, TimeWindow, compute_free_time, render_free_time};
use sprintfree_providers::{CalendarProvider, FetchOptions};

use crate::error::ClientResult;

/// Fetches the sprint window once and prints the report.
pub async fn run(
    provider: &dyn CalendarProvider,
    sprint: &SprintConfig,
    now: DateTime<Local>,
) -> ClientResult<()> {
    for line in report(provider, sprint, now).await? {
        println!("{}", line);
    }
    Ok(())
}

/// Builds the report lines for the `sprint.days` days following `now`.
pub async fn report(
    provider: &dyn CalendarProvider,
    sprint: &SprintConfig,
    now: DateTime<Local>,
) -> ClientResult<Vec<String>> {
    let window = TimeWindow::lookahead_days(now, sprint.days);
    debug!("sprint {} window {:?}", sprint.preset, window);

    let events = provider
        .fetch_events(FetchOptions::new().with_time_window(window))
        .await?;

    Ok(match compute_free_time(sprint, &events) {
        Some(report) => render_free_time(&report),
        None => vec![NO_EVENTS_TEXT.to_string()],
    })
}
