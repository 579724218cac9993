//! Prospector command-line interface.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr so stdout only carries the JSON result.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,prospector=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!("Starting Prospector v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Lookup(args) => {
            let outcome = commands::lookup(args, cli.config.as_deref()).await?;
            Ok(if outcome.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Config(command) => {
            commands::config(command, cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
