//! Lockbox CLI entry point.

use clap::Parser;
use lockbox_cli::{load_config, logging, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Resolve configuration before logging so the file can set the level
    let config = load_config(&cli)?;
    logging::init(cli.verbose, &config.logging);

    // Run the command
    run(cli, config).await
}
