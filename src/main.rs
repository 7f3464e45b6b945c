use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use crypto_scanner::cli::Cli;
use crypto_scanner::config::{Config, Secrets, DEFAULT_CONFIG_PATH};
use crypto_scanner::logging;
use crypto_scanner::scanner::Scanner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_file.as_deref()).context("Failed to initialise logging")?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    info!(
        "Loaded {} watchlist entries and {} exchange addresses from {}",
        config.watchlist.len(),
        config.exchanges.len(),
        config_path.display()
    );

    let scanner = Scanner::new(&config, &Secrets::from_env())?;
    let summary = scanner.run(cli.command()).await;

    if summary.is_failure() {
        error!("No collector produced output");
        return Ok(ExitCode::FAILURE);
    }
    for report in summary.failed() {
        error!("{} collector failed, continuing with partial output", report.name);
    }
    Ok(ExitCode::SUCCESS)
}
