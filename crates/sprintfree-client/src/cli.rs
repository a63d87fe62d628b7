//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sprintfree_core::TracingOutputFormat;

/// sprintfree - free working hours left in the coming sprint
#[derive(Debug, Parser)]
#[command(name = "sprintfree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "SPRINTFREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line format on stderr (compact or json)
    #[arg(long, env = "SPRINTFREE_LOG_FORMAT", default_value = "compact")]
    pub log_format: TracingOutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands. Without one, the free-time report runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the next 10 upcoming events
    List,
}
