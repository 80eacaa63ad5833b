//! Environment variable handling.

use std::env;
use std::path::Path;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Load `KEY=value` pairs from `.env` in the working directory.
///
/// Variables that are already set are left untouched.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    load_dotenv_from(Path::new(".env"))
}

/// Load `KEY=value` pairs from the given file, if it exists.
pub fn load_dotenv_from(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    for (key, value) in parse_dotenv(&content) {
        if env::var(key).is_err() {
            env::set_var(key, value);
        }
    }
    Ok(())
}

/// Parse dotenv content into key/value pairs, skipping comments and blanks.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key, value)
        })
        .collect()
}

/// Environment variable names read by Lockbox.
pub mod vars {
    /// Config file override.
    pub const LOCKBOX_CONFIG: &str = "LOCKBOX_CONFIG";

    /// Home directory override (defaults to `~/.lockbox`).
    pub const LOCKBOX_HOME: &str = "LOCKBOX_HOME";

    /// Envelope passphrase.
    pub const LOCKBOX_PASSPHRASE: &str = "LOCKBOX_PASSPHRASE";

    /// Queue key namespace override.
    pub const LOCKBOX_QUEUE_NAMESPACE: &str = "LOCKBOX_QUEUE_NAMESPACE";

    /// Redis connection URL.
    pub const REDIS_URL: &str = "REDIS_URL";

    /// Redis ACL username.
    pub const REDIS_USER: &str = "REDIS_USER";

    /// Redis password.
    pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";

    /// Base URL used to build verification links.
    pub const FRONTEND_URL: &str = "FRONTEND_URL";
}
