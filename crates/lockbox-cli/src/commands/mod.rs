//! CLI command implementations.

pub mod config;
pub mod crypto;
pub mod queue;
pub mod worker;
