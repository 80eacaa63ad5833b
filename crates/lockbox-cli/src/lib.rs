//! Lockbox command-line interface.

pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use lockbox_core::env::{self, vars};
use lockbox_core::Config;

/// Lockbox - encrypted credential vault tooling
#[derive(Parser)]
#[command(name = "lockbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = vars::LOCKBOX_CONFIG)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a value into an envelope
    Encrypt(commands::crypto::EncryptArgs),

    /// Decrypt an envelope
    Decrypt(commands::crypto::DecryptArgs),

    /// Push jobs and check the queue store
    Queue(commands::queue::QueueArgs),

    /// Run the notification worker until interrupted
    Worker(commands::worker::WorkerArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Load `.env`, then resolve the configuration file and environment overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    env::load_dotenv()?;
    Ok(Config::resolve(cli.config.as_deref())?)
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encrypt(args) => commands::crypto::encrypt(args),
        Commands::Decrypt(args) => commands::crypto::decrypt(args),
        Commands::Queue(args) => commands::queue::run(args, &config).await,
        Commands::Worker(args) => commands::worker::run(args, config).await,
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref(), &config),
        Commands::Version => {
            println!("lockbox {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
