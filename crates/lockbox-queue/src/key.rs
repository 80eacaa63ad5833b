//! Namespaced queue keys.

use std::fmt;

use crate::error::{QueueError, Result};

/// Store key of one logical queue: `<namespace>:<queueName>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueKey(String);

impl QueueKey {
    /// Both parts must be non-empty and free of whitespace and `:`.
    pub fn new(namespace: &str, queue: &str) -> Result<Self> {
        check_part("namespace", namespace)?;
        check_part("queue name", queue)?;
        Ok(Self(format!("{namespace}:{queue}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_part(what: &str, part: &str) -> Result<()> {
    if part.is_empty() || part.contains(|c: char| c.is_whitespace() || c == ':') {
        return Err(QueueError::InvalidKey(format!(
            "{what} {part:?} must be non-empty without whitespace or ':'"
        )));
    }
    Ok(())
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
