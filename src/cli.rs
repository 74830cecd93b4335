//! Command-line interface

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::server;
use crate::server::config::AppConfig;

/// Keywarden server CLI
#[derive(Debug, Parser)]
#[command(
    name = "keywarden",
    version,
    about = "Human-in-the-loop secret unlock gateway"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,
}

/// Load configuration and run the server
pub async fn run(cli: Cli) -> Result<()> {
    info!("Starting Keywarden v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    server::run(config).await
}
