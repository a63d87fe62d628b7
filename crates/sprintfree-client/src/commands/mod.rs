//! Command implementations.

pub mod auth;
pub mod freetime;
pub mod list;
