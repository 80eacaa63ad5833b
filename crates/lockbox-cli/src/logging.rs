//! Tracing subscriber setup.

use lockbox_core::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for the given verbosity and configured level.
///
/// Each `-v` raises the level one step above the configured one.
pub fn directive(verbose: u8, logging: &LoggingConfig) -> String {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    format!("lockbox={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over everything else.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init(verbose: u8, logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, logging)));

    let (plain, json) = if logging.json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (Some(fmt::layer().with_writer(std::io::stderr)), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}
