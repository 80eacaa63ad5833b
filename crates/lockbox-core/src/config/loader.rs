//! Configuration loading and persistence.

use super::Config;
use crate::env::{self, vars};
use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretString;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Resolve the effective configuration for a process.
    ///
    /// Reads `path` (or the default location), falling back to defaults when
    /// no file exists, then applies environment overrides. Any other load
    /// failure is returned.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        };

        let mut config = match loaded {
            Ok(config) => config,
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5.
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(env::get_var);
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(vars::REDIS_URL) {
            self.queue.url = url;
        }
        if let Some(user) = lookup(vars::REDIS_USER) {
            self.queue.username = Some(user);
        }
        if let Some(password) = lookup(vars::REDIS_PASSWORD) {
            self.queue.password = Some(SecretString::new(password));
        }
        if let Some(namespace) = lookup(vars::LOCKBOX_QUEUE_NAMESPACE) {
            self.queue.namespace = namespace;
        }
        if let Some(url) = lookup(vars::FRONTEND_URL) {
            self.notifications.frontend_url = url;
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // 1. Queue store URL scheme
        const SCHEMES: [&str; 3] = ["redis://", "rediss://", "redis+unix://"];
        if !SCHEMES.iter().any(|s| self.queue.url.starts_with(s)) {
            errors.push(format!(
                "Queue url '{}' must start with one of {}",
                self.queue.url,
                SCHEMES.join(", ")
            ));
        }

        // 2. Queue key parts, joined as `<namespace>:<name>`
        for (label, part) in [
            ("namespace", &self.queue.namespace),
            ("name", &self.queue.name),
        ] {
            if part.trim().is_empty() {
                errors.push(format!("Queue {} must not be empty", label));
            } else if part.contains(|c: char| c.is_whitespace() || c == ':') {
                errors.push(format!(
                    "Queue {} '{}' must not contain whitespace or ':'",
                    label, part
                ));
            }
        }

        // 3. Username without password is rejected by Redis AUTH
        if self.queue.username.is_some() && self.queue.password.is_none() {
            errors.push("Queue username is set but password is not".to_string());
        }

        // 4. Frontend URL used in verification links
        let frontend = &self.notifications.frontend_url;
        if !(frontend.starts_with("http://") || frontend.starts_with("https://")) {
            errors.push(format!(
                "Notification frontend_url '{}' must be an http(s) URL",
                frontend
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
