//! Notification worker command.

use std::sync::Arc;

use clap::Args;
use lockbox_core::Config;
use lockbox_queue::{LogDispatcher, QueueClient, QueueWorker};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Worker command arguments.
#[derive(Args)]
pub struct WorkerArgs {
    /// Queue to consume (defaults to the configured queue)
    #[arg(long)]
    pub queue: Option<String>,
}

/// Run the worker until ctrl-c, then close the queue connections.
pub async fn run(args: WorkerArgs, config: Config) -> anyhow::Result<()> {
    let client = Arc::new(QueueClient::connect(&config.queue).await?);
    client.ping().await?;

    let queue = args.queue.unwrap_or_else(|| config.queue.name.clone());
    // Fail on a bad queue name before the loop starts.
    client.key(&queue)?;

    let worker = QueueWorker::new(
        client.clone(),
        queue,
        Arc::new(LogDispatcher),
        config.notifications,
    );

    let shutdown = CancellationToken::new();
    let handle = worker.spawn(shutdown.clone());

    tokio::signal::ctrl_c().await?;
    info!("interrupt received, shutting down");
    shutdown.cancel();

    let report = handle.await?;
    client.disconnect().await?;

    println!(
        "Worker stopped: {} received, {} dispatched, {} failed, {} discarded",
        report.received, report.dispatched, report.failed, report.discarded
    );
    Ok(())
}
