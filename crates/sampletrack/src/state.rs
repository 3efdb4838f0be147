//! Application state.
//!
//! Built once at startup and cloned into every handler. Backends are chosen
//! by cargo features and handed to the service as trait objects.

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast;

use sampletrack_core::events::{EventBus, NotificationKey};
use sampletrack_core::storage::SampleRepository;
use sampletrack_core::token::{Argon2Authority, TokenAuthority};

use crate::config::Config;
use crate::events::EventNotifier;
use crate::service::{SampleService, ServiceSettings};

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Sample operations.
    pub service: SampleService,
    /// Event bus the notifier publishes on and the relay consumes from.
    pub events: Arc<dyn EventBus>,
    /// Upper bound for a whole HTTP request.
    pub request_timeout: Duration,
    /// Shutdown signal sender for background tasks.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Wires the service to the given backends.
    pub fn build(
        config: &Config,
        repo: Arc<dyn SampleRepository>,
        tokens: Arc<dyn TokenAuthority>,
        events: Arc<dyn EventBus>,
    ) -> Self {
        let notifier = Arc::new(EventNotifier::new(
            events.clone(),
            config.notification_topic.clone(),
            config.notification_event_type.clone(),
            config.notification_key(),
        ));
        let service = SampleService::new(
            repo,
            tokens,
            notifier,
            ServiceSettings::from_config(config),
        );
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            service,
            events,
            request_timeout: config.request_timeout(),
            shutdown_tx,
        }
    }

    /// Connects the feature-selected backends.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let repo = build_repository(config).await?;
        let events = build_event_bus(config).await?;

        tracing::info!(
            notification_topic = %config.notification_topic,
            key_with_email = config.notification_key() == NotificationKey::SampleIdAndEmail,
            "Backends ready"
        );

        Ok(Self::build(
            config,
            repo,
            Arc::new(Argon2Authority::new()),
            events,
        ))
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(feature = "inmemory")]
async fn build_repository(_config: &Config) -> Result<Arc<dyn SampleRepository>, anyhow::Error> {
    tracing::info!("Using in-memory storage");
    Ok(Arc::new(crate::storage::InMemoryRepository::new()))
}

#[cfg(feature = "sqlite")]
async fn build_repository(config: &Config) -> Result<Arc<dyn SampleRepository>, anyhow::Error> {
    tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
    let repo = crate::storage::SqliteRepository::new(&config.sqlite_path).await?;
    Ok(Arc::new(repo))
}

#[cfg(feature = "memory")]
async fn build_event_bus(_config: &Config) -> Result<Arc<dyn EventBus>, anyhow::Error> {
    tracing::info!("Using in-process event bus");
    Ok(Arc::new(crate::events::MemoryEventBus::new()))
}

#[cfg(feature = "redis")]
async fn build_event_bus(config: &Config) -> Result<Arc<dyn EventBus>, anyhow::Error> {
    tracing::info!("Using Redis event bus");
    let bus = crate::events::RedisEventBus::new(&config.redis_url).await?;
    Ok(Arc::new(bus))
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory backends with a cheap hash, for tests.
    fn default() -> Self {
        Self::build(
            &Config::default(),
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(Argon2Authority::with_params(8, 1, 1).expect("valid argon2 params")),
            Arc::new(crate::events::MemoryEventBus::new()),
        )
    }
}
