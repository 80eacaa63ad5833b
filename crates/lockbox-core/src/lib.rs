//! # lockbox-core
//!
//! Configuration and shared utilities for Lockbox.
//!
//! This crate provides functionality used across the Lockbox crates:
//!
//! - **Configuration**: Loading, environment overrides, and validation of the JSON5 config file
//! - **Secrets**: A redacting, zeroizing string type for passphrases and store credentials
//! - **Utilities**: Path resolution and environment variable helpers

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;
