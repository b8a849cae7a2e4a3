#![warn(clippy::all)]

mod app;
mod cli;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use logger::init_tracing;
use tracing::{error, info};

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_config(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.print_config {
        print!("{config}");
        return Ok(());
    }

    let orchestrator = app::build_orchestrator(&config, &cli)?;
    let summary = orchestrator.run().await.context("Health-check pass failed")?;

    info!("{summary}");
    Ok(())
}
