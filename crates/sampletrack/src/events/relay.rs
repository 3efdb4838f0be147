//! Internal-event relay.
//!
//! Consumes trusted update requests from the inbound topic and applies them
//! through [`SampleService::apply_trusted_update`]. Bad envelopes and failed
//! updates are logged and dropped so one message never stalls the stream.
//! A closed inbound channel is resubscribed with backoff until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use sampletrack_core::events::{EventEnvelope, EventSubscriber};
use sampletrack_core::sample::SampleUpdate;

use crate::config::Config;
use crate::service::SampleService;

/// Which envelopes the relay accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub topic: String,
    pub event_type: String,
    /// Base delay before resubscribing, multiplied by the attempt number.
    pub resubscribe_backoff: Duration,
}

/// Cap on the resubscribe backoff multiplier.
const MAX_BACKOFF_STEPS: u32 = 30;

impl RelaySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            topic: config.inbound_topic.clone(),
            event_type: config.inbound_event_type.clone(),
            resubscribe_backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Applied,
    Ignored,
    Failed,
}

/// Runs until `shutdown` fires.
///
/// `receiver` must already be subscribed to `settings.topic`. When it closes,
/// a fresh subscription is taken from `events`.
pub async fn run_relay(
    service: SampleService,
    events: Arc<dyn EventSubscriber>,
    mut receiver: broadcast::Receiver<EventEnvelope>,
    settings: RelaySettings,
    mut shutdown: broadcast::Receiver<()>,
) {
    tracing::info!(topic = %settings.topic, event_type = %settings.event_type, "Relay started");

    loop {
        tokio::select! {
            result = receiver.recv() => {
                match result {
                    Ok(envelope) => {
                        handle_envelope(&service, &settings, &envelope).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(topic = %settings.topic, lagged = n, "Relay lagged, requests skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::warn!(topic = %settings.topic, "Inbound channel closed, resubscribing");
                        match resubscribe(events.as_ref(), &settings, &mut shutdown).await {
                            Some(next) => receiver = next,
                            None => break,
                        }
                    }
                }
            }
            _ = shutdown.recv() => {
                tracing::debug!("Relay shutting down");
                break;
            }
        }
    }
}

/// Subscribes to the inbound topic again, backing off between attempts.
/// Returns `None` once shutdown fires.
async fn resubscribe(
    events: &dyn EventSubscriber,
    settings: &RelaySettings,
    shutdown: &mut broadcast::Receiver<()>,
) -> Option<broadcast::Receiver<EventEnvelope>> {
    let mut attempt: u32 = 1;

    loop {
        let delay = settings.resubscribe_backoff * attempt.min(MAX_BACKOFF_STEPS);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.recv() => {
                tracing::debug!("Relay shutting down");
                return None;
            }
        }

        match events.subscribe(&settings.topic).await {
            Ok(receiver) => {
                tracing::info!(topic = %settings.topic, attempt, "Relay resubscribed");
                return Some(receiver);
            }
            Err(e) => {
                tracing::warn!(topic = %settings.topic, attempt, error = %e, "Resubscribe failed");
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

async fn handle_envelope(
    service: &SampleService,
    settings: &RelaySettings,
    envelope: &EventEnvelope,
) -> Outcome {
    if envelope.topic != settings.topic || envelope.event_type != settings.event_type {
        tracing::debug!(
            topic = %envelope.topic,
            event_type = %envelope.event_type,
            "Ignoring unexpected event"
        );
        return Outcome::Ignored;
    }

    let update: SampleUpdate = match envelope.decode() {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(key = %envelope.key, error = %e, "Dropping malformed update request");
            return Outcome::Failed;
        }
    };

    match service.apply_trusted_update(&update).await {
        Ok(_) => Outcome::Applied,
        Err(e) => {
            tracing::warn!(sample_id = %update.sample_id, error = %e, "Trusted update failed");
            Outcome::Failed
        }
    }
}
