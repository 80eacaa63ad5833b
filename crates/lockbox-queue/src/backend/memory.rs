//! In-process list store.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use super::QueueBackend;
use crate::error::{QueueError, Result};

/// Lists held in memory, with blocking pops woken by pushes.
///
/// Waiters register with the notifier before inspecting the list, so a push
/// that lands between the check and the wait still wakes them.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
    pushed: Notify,
    closed: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items waiting in `key`.
    pub async fn len(&self, key: &str) -> usize {
        self.lists.lock().await.get(key).map_or(0, VecDeque::len)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(QueueError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QueueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn push(&self, key: &str, payload: String) -> Result<()> {
        self.ensure_open()?;
        self.lists
            .lock()
            .await
            .entry(key.to_string())
            .or_default()
            .push_front(payload);
        self.pushed.notify_waiters();
        Ok(())
    }

    async fn blocking_pop(&self, key: &str) -> Result<String> {
        loop {
            let notified = self.pushed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            self.ensure_open()?;
            if let Some(item) = self.lists.lock().await.get_mut(key).and_then(VecDeque::pop_back) {
                return Ok(item);
            }

            notified.await;
        }
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_open()
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        self.pushed.notify_waiters();
        Ok(())
    }
}
