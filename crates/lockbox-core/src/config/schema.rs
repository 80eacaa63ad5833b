//! Configuration schema definitions.

use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Default Redis connection URL.
pub const DEFAULT_QUEUE_URL: &str = "redis://127.0.0.1:6379";

/// Default key namespace, isolating Lockbox queues from unrelated keys.
pub const DEFAULT_QUEUE_NAMESPACE: &str = "password_manager";

/// Default queue carrying notification jobs.
pub const DEFAULT_QUEUE_NAME: &str = "email_queue";

/// Main Lockbox configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Background queue store settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Notification rendering settings.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Queue store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Redis URL shared by the producer and consumer connections.
    #[serde(default = "default_queue_url")]
    pub url: String,

    /// ACL username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretString>,

    /// Prefix joined to every queue name as `<namespace>:<name>`.
    #[serde(default = "default_queue_namespace")]
    pub namespace: String,

    /// Queue the worker consumes.
    #[serde(default = "default_queue_name")]
    pub name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: default_queue_url(),
            username: None,
            password: None,
            namespace: default_queue_namespace(),
            name: default_queue_name(),
        }
    }
}

fn default_queue_url() -> String {
    DEFAULT_QUEUE_URL.to_string()
}

fn default_queue_namespace() -> String {
    DEFAULT_QUEUE_NAMESPACE.to_string()
}

fn default_queue_name() -> String {
    DEFAULT_QUEUE_NAME.to_string()
}

/// Notification rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Base URL of the web frontend; verification links point here.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Sender address stamped on outgoing notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            frontend_url: default_frontend_url(),
            sender: None,
        }
    }
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
