use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::sample::SampleUpdated;

use super::{EventEnvelope, Result};

/// Publishes envelopes onto their topic.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes an event to every subscriber of `event.topic`.
    async fn publish(&self, event: &EventEnvelope) -> Result<()>;
}

/// Subscribes to a topic.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Subscribes to events published on `topic`.
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<EventEnvelope>>;
}

/// Combined trait for transports that can both publish and subscribe.
pub trait EventBus: EventPublisher + EventSubscriber {}

impl<T: EventPublisher + EventSubscriber> EventBus for T {}

/// Outbound notification port for finished sample updates.
#[async_trait]
pub trait SampleNotifier: Send + Sync {
    /// Announces that a sample was updated.
    async fn sample_updated(&self, payload: &SampleUpdated) -> Result<()>;
}
