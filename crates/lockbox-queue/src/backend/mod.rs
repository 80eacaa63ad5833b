//! List stores the queue client runs on.
//!
//! A backend exposes the three list primitives the queue needs: push onto
//! the head, blocking pop from the tail, and a liveness probe. Producer and
//! consumer traffic must not share a connection, so a blocked pop never
//! stalls a push or ping issued from the same process.

mod memory;
mod redis_backend;

pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Async trait for queue list stores.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Atomically push `payload` onto the head of list `key`.
    async fn push(&self, key: &str, payload: String) -> Result<()>;

    /// Pop from the tail of list `key`, waiting with no timeout until an
    /// item exists. The item is removed before it is returned.
    async fn blocking_pop(&self, key: &str) -> Result<String>;

    /// Liveness check on the producer side.
    async fn ping(&self) -> Result<()>;

    /// Close producer and consumer connections. Later calls fail with
    /// [`crate::QueueError::Closed`].
    async fn close(&self) -> Result<()>;
}
