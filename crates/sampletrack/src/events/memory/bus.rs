//! In-memory event bus.
//!
//! One tokio broadcast channel per topic, created on first use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use sampletrack_core::events::{EventEnvelope, EventPublisher, EventSubscriber, Result};

/// Channel capacity for each topic.
const CHANNEL_CAPACITY: usize = 100;

/// In-memory event bus.
#[derive(Debug, Clone)]
pub struct MemoryEventBus {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<EventEnvelope>>>>,
}

impl MemoryEventBus {
    /// Creates a bus with no topics.
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets or creates the channel for a topic.
    async fn get_or_create_channel(&self, topic: &str) -> broadcast::Sender<EventEnvelope> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(topic) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;

        // Double-check after acquiring write lock
        if let Some(sender) = channels.get(topic) {
            return sender.clone();
        }

        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        channels.insert(topic.to_string(), sender.clone());
        sender
    }
}

impl Default for MemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventBus {
    async fn publish(&self, event: &EventEnvelope) -> Result<()> {
        let sender = self.get_or_create_channel(&event.topic).await;

        // No receivers is not an error, nobody is listening on this topic yet.
        let _ = sender.send(event.clone());

        tracing::trace!(topic = %event.topic, key = %event.key, "Event published");
        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for MemoryEventBus {
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<EventEnvelope>> {
        let sender = self.get_or_create_channel(topic).await;
        Ok(sender.subscribe())
    }
}
