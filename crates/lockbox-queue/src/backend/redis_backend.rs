//! Redis list store (`LPUSH` / `BRPOP`).

use async_trait::async_trait;
use lockbox_core::config::QueueConfig;
use redis::aio::ConnectionManager;
use redis::{Client, IntoConnectionInfo};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::QueueBackend;
use crate::error::{QueueError, Result};

/// Two dedicated Redis connections: one for `LPUSH`/`PING`, one for `BRPOP`.
///
/// A `BRPOP` parks its connection server-side until an item arrives, so it
/// gets a socket of its own. Both are [`ConnectionManager`]s: a dropped socket
/// fails the in-flight command and the next command runs on a fresh one.
pub struct RedisBackend {
    producer: RwLock<Option<ConnectionManager>>,
    consumer: RwLock<Option<ConnectionManager>>,
}

impl RedisBackend {
    /// Open both connections using the queue section of the config.
    pub async fn connect(config: &QueueConfig) -> Result<Self> {
        let mut info = config.url.as_str().into_connection_info()?;
        if let Some(username) = &config.username {
            info.redis.username = Some(username.clone());
        }
        if let Some(password) = &config.password {
            info.redis.password = Some(password.expose_secret().to_string());
        }

        let client = Client::open(info)?;
        let producer = ConnectionManager::new(client.clone()).await?;
        let consumer = ConnectionManager::new(client).await?;
        info!(url = %redacted_url(&config.url), "connected to queue store");

        Ok(Self {
            producer: RwLock::new(Some(producer)),
            consumer: RwLock::new(Some(consumer)),
        })
    }

    async fn producer(&self) -> Result<ConnectionManager> {
        self.producer.read().await.clone().ok_or(QueueError::Closed)
    }

    async fn consumer(&self) -> Result<ConnectionManager> {
        self.consumer.read().await.clone().ok_or(QueueError::Closed)
    }
}

/// Strip userinfo from a connection URL before it is logged.
fn redacted_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[async_trait]
impl QueueBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn push(&self, key: &str, payload: String) -> Result<()> {
        let mut conn = self.producer().await?;
        let len: i64 = redis::cmd("LPUSH")
            .arg(key)
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        debug!(key, len, "pushed job");
        Ok(())
    }

    async fn blocking_pop(&self, key: &str) -> Result<String> {
        let mut conn = self.consumer().await?;
        // Timeout 0 blocks until an element exists.
        let popped: Option<(String, String)> = redis::cmd("BRPOP")
            .arg(key)
            .arg(0)
            .query_async(&mut conn)
            .await?;
        popped
            .map(|(_, payload)| payload)
            .ok_or_else(|| QueueError::Unavailable(format!("BRPOP on {key} returned nil")))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.producer().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(QueueError::Unavailable(format!("unexpected PING reply: {pong}")))
        }
    }

    async fn close(&self) -> Result<()> {
        // Dropping the last handle shuts the connection's driver task down.
        let producer = self.producer.write().await.take();
        let consumer = self.consumer.write().await.take();
        debug!(
            producer = producer.is_some(),
            consumer = consumer.is_some(),
            "closing queue store connections"
        );
        Ok(())
    }
}
