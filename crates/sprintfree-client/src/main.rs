//! sprintfree CLI entry point.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::debug;

use sprintfree_client::cli::{Cli, Command};
use sprintfree_client::commands;
use sprintfree_client::config::ClientConfig;
use sprintfree_client::error::{ClientError, ClientResult, exit_status};
use sprintfree_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = TracingConfig::cli(cli.debug).with_format(cli.log_format);
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    // Errors stop the run; only fatal ones change the exit status.
    let result = run(cli).await;
    if let Err(ref e) = result {
        debug!("run failed: {:?}", e);
        println!("{}", e);
    }
    ExitCode::from(exit_status(&result))
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    let provider = commands::auth::google(&config).await?;

    match cli.command {
        Some(Command::List) => commands::list::run(&provider, Local::now()).await,
        None => commands::freetime::run(&provider, &config.sprint_config(), Local::now()).await,
    }
}
