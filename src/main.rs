#![allow(non_snake_case)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use weekPlanner::cli::{self, Cli};
use weekPlanner::config::{AppConfig, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let settings = Settings::resolve(&config).map_err(anyhow::Error::msg)?;
    cli::run(cli, settings).await
}
