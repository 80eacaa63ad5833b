//! Queue and worker end to end over the in-process backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lockbox_core::config::{Config, NotificationConfig};
use lockbox_queue::{
    DispatchError, MemoryBackend, NotificationDispatcher, QueueBackend, QueueClient, QueueJob,
    QueueWorker, Template, TemplateParams,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Forwards every notification to a channel.
struct Outbox(mpsc::UnboundedSender<(String, TemplateParams)>);

#[async_trait]
impl NotificationDispatcher for Outbox {
    async fn send(&self, recipient: &str, params: &TemplateParams) -> Result<(), DispatchError> {
        self.0
            .send((recipient.to_string(), params.clone()))
            .map_err(|e| DispatchError::Transport(e.to_string()))
    }
}

async fn recv(
    rx: &mut mpsc::UnboundedReceiver<(String, TemplateParams)>,
) -> (String, TemplateParams) {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification within a second")
        .expect("dispatcher alive")
}

#[tokio::test]
async fn test_jobs_flow_from_producer_to_dispatcher() {
    let config = Config::default();
    let backend = Arc::new(MemoryBackend::new());
    let client = Arc::new(QueueClient::with_backend(
        backend.clone(),
        &config.queue.namespace,
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let notifications = NotificationConfig {
        frontend_url: "https://vault.example.com".to_string(),
        sender: None,
    };
    let worker = QueueWorker::new(
        client.clone(),
        config.queue.name.clone(),
        Arc::new(Outbox(tx)),
        notifications,
    );
    let shutdown = CancellationToken::new();
    let handle = worker.spawn(shutdown.clone());

    client
        .enqueue(
            &config.queue.name,
            &QueueJob::VerifyEmail {
                email: "new@example.com".to_string(),
                token: "tok-1".to_string(),
            },
        )
        .await
        .unwrap();
    client
        .enqueue(
            &config.queue.name,
            &QueueJob::SecretCreated {
                owner_id: "owner-1".to_string(),
                email: "new@example.com".to_string(),
                website_name: "GitHub".to_string(),
            },
        )
        .await
        .unwrap();

    let (recipient, params) = recv(&mut rx).await;
    assert_eq!(recipient, "new@example.com");
    assert_eq!(params.template, Template::VerifyEmail);
    assert_eq!(
        params.values["verify_url"],
        "https://vault.example.com/verified-email?token=tok-1"
    );

    let (_, params) = recv(&mut rx).await;
    assert_eq!(params.template, Template::SecretCreated);

    // Consumed jobs are gone from the store.
    assert_eq!(backend.len("password_manager:email_queue").await, 0);

    shutdown.cancel();
    let report = handle.await.unwrap();
    assert_eq!(report.received, 2);
    assert_eq!(report.dispatched, 2);

    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_worker_skips_garbage_and_keeps_going() {
    let backend = Arc::new(MemoryBackend::new());
    let client = Arc::new(QueueClient::with_backend(backend.clone(), "ns"));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = QueueWorker::new(
        client.clone(),
        "q",
        Arc::new(Outbox(tx)),
        NotificationConfig::default(),
    );
    let shutdown = CancellationToken::new();
    let handle = worker.spawn(shutdown.clone());

    backend.push("ns:q", "{\"kind\":\"unknown\"}".to_string()).await.unwrap();
    client
        .enqueue(
            "q",
            &QueueJob::VerifyEmail {
                email: "a@example.com".to_string(),
                token: "t".to_string(),
            },
        )
        .await
        .unwrap();

    let (recipient, _) = recv(&mut rx).await;
    assert_eq!(recipient, "a@example.com");

    shutdown.cancel();
    let report = handle.await.unwrap();
    assert_eq!(report.discarded, 1);
    assert_eq!(report.dispatched, 1);
}
