//! Redis pub/sub event bus.
//!
//! Envelopes are published as JSON on `events:<topic>`. Each subscribed topic
//! gets one background task forwarding Redis messages into a local broadcast
//! channel. When that task ends the channel closes, and the next
//! `subscribe` for the topic starts a new one.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};

use sampletrack_core::events::{
    topic_channel, EventEnvelope, EventError, EventPublisher, EventSubscriber, Result,
};

use super::error::{map_publish_error, map_subscribe_error};

const CHANNEL_CAPACITY: usize = 100;

type Subscriptions = Arc<RwLock<HashMap<String, broadcast::Sender<EventEnvelope>>>>;

/// Redis-backed event bus.
pub struct RedisEventBus {
    client: redis::Client,
    subscriptions: Subscriptions,
}

impl RedisEventBus {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `EventError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| EventError::ConnectionFailed(e.to_string()))?;

        // Verify connection by getting a connection
        let _ = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| EventError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisEventBus {
    async fn publish(&self, event: &EventEnvelope) -> Result<()> {
        let channel = topic_channel(&event.topic);

        let payload =
            serde_json::to_string(event).map_err(|e| EventError::Serialization(e.to_string()))?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_publish_error)?;

        conn.publish::<_, _, ()>(&channel, &payload)
            .await
            .map_err(map_publish_error)?;

        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for RedisEventBus {
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<EventEnvelope>> {
        {
            let subscriptions = self.subscriptions.read().await;
            if let Some(sender) = subscriptions.get(topic) {
                return Ok(sender.subscribe());
            }
        }

        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);

        {
            let mut subscriptions = self.subscriptions.write().await;
            // Double-check in case another task created it
            if let Some(sender) = subscriptions.get(topic) {
                return Ok(sender.subscribe());
            }
            subscriptions.insert(topic.to_string(), tx.clone());
        }

        let client = self.client.clone();
        let subscriptions = Arc::clone(&self.subscriptions);
        let topic = topic.to_string();

        tokio::spawn(async move {
            if let Err(e) = run_subscription_loop(client, &topic, tx, &subscriptions).await {
                tracing::error!(%topic, error = %e, "Redis subscription failed");
                subscriptions.write().await.remove(&topic);
            }
        });

        Ok(rx)
    }
}

/// Forwards Redis messages for one topic into the broadcast channel.
async fn run_subscription_loop(
    client: redis::Client,
    topic: &str,
    tx: broadcast::Sender<EventEnvelope>,
    subscriptions: &Subscriptions,
) -> Result<()> {
    let mut pubsub = client.get_async_pubsub().await.map_err(map_subscribe_error)?;

    pubsub
        .subscribe(topic_channel(topic))
        .await
        .map_err(map_subscribe_error)?;

    let mut stream = pubsub.on_message();

    while let Some(msg) = stream.next().await {
        let payload: String = match msg.get_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(%topic, error = %e, "Unreadable Redis message payload");
                continue;
            }
        };

        match serde_json::from_str::<EventEnvelope>(&payload) {
            Ok(event) => {
                // Ignore send errors (no receivers)
                let _ = tx.send(event);
            }
            Err(e) => {
                tracing::warn!(%topic, error = %e, "Failed to deserialize event envelope");
            }
        }
    }

    tracing::info!(%topic, "Redis subscription stream ended");
    subscriptions.write().await.remove(topic);

    Ok(())
}
