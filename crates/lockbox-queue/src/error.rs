//! Queue and dispatch error types.

use thiserror::Error;

/// Errors that can occur during queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Transport or store failure. The in-flight operation is abandoned and
    /// no reconnect is attempted.
    #[error("Queue unavailable: {0}")]
    Unavailable(String),

    /// The client was disconnected.
    #[error("Queue client is closed")]
    Closed,

    /// Invalid namespace or queue name.
    #[error("Invalid queue key: {0}")]
    InvalidKey(String),

    /// Job could not be serialized; nothing was pushed.
    #[error("Failed to encode job: {0}")]
    Encode(#[source] serde_json::Error),

    /// A popped payload is not a known job. It has already been removed from
    /// the queue.
    #[error("Failed to decode job from {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<redis::RedisError> for QueueError {
    fn from(err: redis::RedisError) -> Self {
        QueueError::Unavailable(err.to_string())
    }
}

/// Convenience result alias for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// A notification could not be delivered.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The recipient was rejected by the transport.
    #[error("Recipient rejected: {0}")]
    Rejected(String),

    /// Transport failure.
    #[error("Dispatch failed: {0}")]
    Transport(String),
}
