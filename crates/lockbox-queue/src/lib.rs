//! Background notification queue for Lockbox.
//!
//! Producers push [`QueueJob`]s through a [`QueueClient`]; a single
//! [`QueueWorker`] per process blocks on the consumer connection and hands
//! each job to a [`NotificationDispatcher`]. Delivery is at-most-once.

pub mod backend;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod job;
pub mod key;
pub mod worker;

pub use backend::{MemoryBackend, QueueBackend, RedisBackend};
pub use client::QueueClient;
pub use dispatcher::{LogDispatcher, NotificationDispatcher, Template, TemplateParams};
pub use error::{DispatchError, QueueError, Result};
pub use job::QueueJob;
pub use key::QueueKey;
pub use worker::{QueueWorker, WorkerReport};
