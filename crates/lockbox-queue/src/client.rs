//! Producer/consumer client over a [`QueueBackend`].

use std::sync::Arc;

use lockbox_core::config::QueueConfig;
use tracing::{debug, info};

use crate::backend::{MemoryBackend, QueueBackend, RedisBackend};
use crate::error::Result;
use crate::job::QueueJob;
use crate::key::QueueKey;

/// FIFO job queue client.
///
/// `enqueue` pushes onto the head of `<namespace>:<queue>` and `consume` pops
/// from the tail, so the oldest job is returned first. Delivery is
/// at-most-once: a job is gone from the store once `consume` returns it,
/// whatever happens to it afterwards.
///
/// Constructed once by the process entry point and shared by `Arc`.
pub struct QueueClient {
    backend: Arc<dyn QueueBackend>,
    namespace: String,
}

impl QueueClient {
    /// Connect to the Redis store described by `config`.
    pub async fn connect(config: &QueueConfig) -> Result<Self> {
        let backend = RedisBackend::connect(config).await?;
        Ok(Self::with_backend(Arc::new(backend), &config.namespace))
    }

    /// Client over a fresh in-process store.
    pub fn in_memory(namespace: &str) -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()), namespace)
    }

    pub fn with_backend(backend: Arc<dyn QueueBackend>, namespace: &str) -> Self {
        Self {
            backend,
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Store key for `queue`.
    pub fn key(&self, queue: &str) -> Result<QueueKey> {
        QueueKey::new(&self.namespace, queue)
    }

    /// Serialize `job` and push it. Returns once the store acknowledges the
    /// push; does not wait for a consumer.
    pub async fn enqueue(&self, queue: &str, job: &QueueJob) -> Result<()> {
        let key = self.key(queue)?;
        let payload = job.encode()?;
        self.backend.push(key.as_str(), payload).await?;
        debug!(%key, kind = job.kind(), "enqueued job");
        Ok(())
    }

    /// Wait for the next job on `queue` and return it.
    pub async fn consume(&self, queue: &str) -> Result<QueueJob> {
        let key = self.key(queue)?;
        let payload = self.backend.blocking_pop(key.as_str()).await?;
        QueueJob::decode(key.as_str(), &payload)
    }

    /// Liveness check on the producer connection.
    pub async fn ping(&self) -> Result<()> {
        self.backend.ping().await
    }

    /// Close both connections. Only used on deliberate shutdown.
    pub async fn disconnect(&self) -> Result<()> {
        self.backend.close().await?;
        info!(backend = self.backend.name(), "queue client disconnected");
        Ok(())
    }
}

impl std::fmt::Debug for QueueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueClient")
            .field("backend", &self.backend.name())
            .field("namespace", &self.namespace)
            .finish()
    }
}
