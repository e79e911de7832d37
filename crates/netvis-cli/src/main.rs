//! netvis - Main Entry Point

use anyhow::Result;
use clap::Parser;
use netvis_cli::{load_config, run, Args};
use netvis_common::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&LoggingConfig::from(&config.logging))?;

    info!(command = ?args.command, "Starting netvis");

    if let Err(e) = run(&args.command, &config) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
