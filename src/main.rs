use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use swapquote::application::{Cli, CommandExecutor};
use swapquote::{MarketConfig, SwapService};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Config file if given, bundled market otherwise
    let market = match &cli.config {
        Some(path) => MarketConfig::from_file(path)
            .with_context(|| format!("load market from {}", path.display()))?,
        None => MarketConfig::bundled().context("load bundled market")?,
    };
    let service = Arc::new(SwapService::from_config(market).context("build market")?);
    debug!("executing {:?}", cli.command);

    CommandExecutor::execute(cli.command, service)
}
