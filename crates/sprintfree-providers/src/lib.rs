//! CalendarProvider trait and implementations.
//!
//! - [`CalendarProvider`] - The trait the commands fetch events through
//! - [`ProviderError`] - Error types for provider operations
//! - [`google`] - Google Calendar backend with the console OAuth flow
//!
//! # Example
//!
//! ```ignore
//! use sprintfree_providers::{CalendarProvider, FetchOptions};
//!
//! async fn upcoming(provider: &dyn CalendarProvider) -> ProviderResult<Vec<CalendarEvent>> {
//!     provider.fetch_events(FetchOptions::new().with_max_results(10)).await
//! }
//! ```

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod provider;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{BoxFuture, CalendarProvider, FetchOptions};
