//! Outbound update notifications over the event bus.

use std::sync::Arc;

use async_trait::async_trait;

use sampletrack_core::events::{
    notification_key, EventEnvelope, EventPublisher, NotificationKey, Result, SampleNotifier,
};
use sampletrack_core::sample::SampleUpdated;

/// [`SampleNotifier`] that wraps each payload in an envelope and publishes it.
pub struct EventNotifier {
    publisher: Arc<dyn EventPublisher>,
    topic: String,
    event_type: String,
    key_mode: NotificationKey,
}

impl EventNotifier {
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        topic: impl Into<String>,
        event_type: impl Into<String>,
        key_mode: NotificationKey,
    ) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            event_type: event_type.into(),
            key_mode,
        }
    }
}

#[async_trait]
impl SampleNotifier for EventNotifier {
    async fn sample_updated(&self, payload: &SampleUpdated) -> Result<()> {
        let key = notification_key(payload, self.key_mode);
        let envelope = EventEnvelope::new(&self.topic, &self.event_type, key, payload)?;
        self.publisher.publish(&envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemoryEventBus;
    use sampletrack_core::events::EventSubscriber;
    use sampletrack_core::sample::{SampleStatus, TestResult};

    fn payload() -> SampleUpdated {
        SampleUpdated {
            sample_id: "Ab12Cd34Ef".to_string(),
            submitter_email: "byro93@live.com".to_string(),
            status: SampleStatus::Completed,
            test_result: TestResult::Negative,
            test_date: Some("2023-02-03T11:45".to_string()),
        }
    }

    #[tokio::test]
    async fn test_publishes_envelope_on_topic() {
        let bus = Arc::new(MemoryEventBus::new());
        let mut rx = bus.subscribe("sample_updates").await.unwrap();
        let notifier = EventNotifier::new(
            bus.clone(),
            "sample_updates",
            "sample_updated",
            NotificationKey::SampleId,
        );

        notifier.sample_updated(&payload()).await.unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.topic, "sample_updates");
        assert_eq!(envelope.event_type, "sample_updated");
        assert_eq!(envelope.key, "Ab12Cd34Ef");
        assert_eq!(envelope.decode::<SampleUpdated>().unwrap(), payload());
    }

    #[tokio::test]
    async fn test_key_includes_email_when_configured() {
        let bus = Arc::new(MemoryEventBus::new());
        let mut rx = bus.subscribe("sample_updates").await.unwrap();
        let notifier = EventNotifier::new(
            bus.clone(),
            "sample_updates",
            "sample_updated",
            NotificationKey::SampleIdAndEmail,
        );

        notifier.sample_updated(&payload()).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().key, "Ab12Cd34Efbyro93@live.com");
    }
}
