//! Background worker draining the notification queue.

use std::sync::Arc;
use std::time::Duration;

use lockbox_core::config::NotificationConfig;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::client::QueueClient;
use crate::dispatcher::{NotificationDispatcher, TemplateParams};
use crate::error::QueueError;
use crate::job::QueueJob;

/// Counters reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Jobs popped and decoded.
    pub received: u64,
    /// Jobs the dispatcher accepted.
    pub dispatched: u64,
    /// Jobs dropped after a dispatch failure.
    pub failed: u64,
    /// Payloads dropped because they did not decode.
    pub discarded: u64,
}

/// Pause after a failed pop before the next one.
pub const DEFAULT_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// Single consumer loop: pop, dispatch, repeat.
///
/// A failed dispatch is logged and the job is dropped; there is no retry or
/// requeue. A failed pop is followed by a fixed pause so a dead store does not
/// turn the loop into a busy spin. One worker per process.
pub struct QueueWorker {
    client: Arc<QueueClient>,
    queue: String,
    dispatcher: Arc<dyn NotificationDispatcher>,
    notifications: NotificationConfig,
    error_pause: Duration,
}

impl QueueWorker {
    pub fn new(
        client: Arc<QueueClient>,
        queue: impl Into<String>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        notifications: NotificationConfig,
    ) -> Self {
        Self {
            client,
            queue: queue.into(),
            dispatcher,
            notifications,
            error_pause: DEFAULT_ERROR_PAUSE,
        }
    }

    /// Override the pause taken after a failed pop.
    pub fn with_error_pause(mut self, pause: Duration) -> Self {
        self.error_pause = pause;
        self
    }

    /// Run the loop on a new task until `shutdown` is cancelled.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<WorkerReport> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run the loop until `shutdown` is cancelled or the client is closed.
    ///
    /// The blocking pop is raced against `shutdown`; a job being dispatched
    /// when cancellation arrives is finished first.
    pub async fn run(self, shutdown: CancellationToken) -> WorkerReport {
        let mut report = WorkerReport::default();
        info!(queue = %self.queue, namespace = self.client.namespace(), "queue worker started");

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                next = self.client.consume(&self.queue) => next,
            };

            match next {
                Ok(job) => {
                    report.received += 1;
                    if self.dispatch(&job).await {
                        report.dispatched += 1;
                    } else {
                        report.failed += 1;
                    }
                }
                Err(QueueError::Closed) => {
                    warn!("queue client closed, stopping worker");
                    break;
                }
                Err(e @ QueueError::Decode { .. }) => {
                    report.discarded += 1;
                    warn!(error = %e, "discarding undecodable job");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        pause_ms = self.error_pause.as_millis() as u64,
                        "failed to pop job"
                    );
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(self.error_pause) => {}
                    }
                }
            }
        }

        info!(
            received = report.received,
            dispatched = report.dispatched,
            failed = report.failed,
            discarded = report.discarded,
            "queue worker stopped"
        );
        report
    }

    async fn dispatch(&self, job: &QueueJob) -> bool {
        let (recipient, params) = TemplateParams::for_job(job, &self.notifications);
        match self.dispatcher.send(&recipient, &params).await {
            Ok(()) => {
                debug!(kind = job.kind(), "job dispatched");
                true
            }
            Err(e) => {
                error!(kind = job.kind(), error = %e, "dispatch failed, dropping job");
                false
            }
        }
    }
}
