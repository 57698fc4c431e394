//! Ambry CLI binary.
//!
//! Command-line access to configured storage backends:
//! - Create, list and delete buckets
//! - Upload, download, inspect and delete files
//! - Download images through configured transforms

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, handle_command};

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ambry::AmbryConfig::load(cli.config.as_deref())?;
    handle_command(&config, cli.command)?;

    Ok(())
}
