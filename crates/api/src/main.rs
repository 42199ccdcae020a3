//! Roster - student roster command-line client
//!
//! Main entry point.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use roster_infra::config;
use roster_lib::utils::logging::init_logging;
use roster_lib::{output, AppContext, Cli};

async fn run() -> anyhow::Result<u8> {
    // Load environment variables from .env file before reading config
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;
    cli.apply(&mut config);
    config::validate(&config).context("invalid configuration")?;

    init_logging(&config.logging);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    let ctx = AppContext::new(config).context("failed to initialise application")?;
    let outcome = roster_lib::run(&ctx, &cli.command).await?;

    output::print_json(&outcome.body())?;
    Ok(outcome.exit_code())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            output::hint(&format!("Error: {err:#}"));
            ExitCode::FAILURE
        }
    }
}
