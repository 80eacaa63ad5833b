//! Configuration management commands.

use std::path::{Path, PathBuf};

use clap::Args;
use lockbox_core::{paths, Config, SecretString};

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Validate the effective configuration
    Validate,

    /// Show configuration file path
    Path,
}

/// Run the config command.
///
/// `config` is the effective configuration (file plus environment overrides);
/// `path` is the `--config` value, if one was given.
pub fn run(args: ConfigArgs, path: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let json = serde_json::to_string_pretty(&redacted(config))?;
            println!("{}", json);
        }

        ConfigCommand::Validate => {
            config.validate()?;
            println!("Configuration is valid.");
        }

        ConfigCommand::Path => {
            println!("{}", config_path(path)?.display());
        }
    }

    Ok(())
}

fn config_path(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(paths::config_file()?),
    }
}

/// Copy of `config` safe to print.
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if config.queue.password.is_some() {
        config.queue.password = Some(SecretString::new("********"));
    }
    config
}
