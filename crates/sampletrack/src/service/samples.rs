//! The sample service.
//!
//! Every operation follows the same shape: validate the input, load the
//! record, check the presented token against the stored hash, apply the
//! change, persist it and announce it. Storage and notification sit behind
//! trait objects so the backends can be swapped at startup.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sampletrack_core::events::{EventError, SampleNotifier};
use sampletrack_core::sample::{
    validate_new_sample, validate_update, CreatedSample, NewSample, Sample, SampleUpdate,
    SampleView,
};
use sampletrack_core::storage::{self, SampleRepository};
use sampletrack_core::token::{generate_sample_id, TokenAuthority, TokenError};

use super::{KeyGuard, KeyedLocks, ServiceError};
use crate::config::Config;

type Result<T> = std::result::Result<T, ServiceError>;

/// Tunables for [`SampleService`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub token_length: usize,
    pub sample_id_length: usize,
    pub store_timeout: Duration,
    /// Total delivery attempts per notification, at least one.
    pub notify_attempts: u32,
    /// Upper bound for one delivery attempt.
    pub notify_timeout: Duration,
    /// Base delay between delivery attempts, multiplied by the attempt number.
    pub notify_backoff: Duration,
    /// Fresh IDs tried before a creation gives up on collisions.
    pub id_attempts: u32,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            token_length: config.token_length,
            sample_id_length: config.sample_id_length,
            store_timeout: config.store_timeout(),
            notify_attempts: config.notify_attempts,
            notify_timeout: config.notify_timeout(),
            ..Self::default()
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            token_length: config.token_length,
            sample_id_length: config.sample_id_length,
            store_timeout: config.store_timeout(),
            notify_attempts: config.notify_attempts,
            notify_timeout: config.notify_timeout(),
            notify_backoff: Duration::from_millis(50),
            id_attempts: 5,
        }
    }
}

/// Creates, reads and updates samples on behalf of token holders and of the
/// trusted internal channel.
#[derive(Clone)]
pub struct SampleService {
    repo: Arc<dyn SampleRepository>,
    tokens: Arc<dyn TokenAuthority>,
    notifier: Arc<dyn SampleNotifier>,
    locks: KeyedLocks,
    settings: ServiceSettings,
}

impl SampleService {
    pub fn new(
        repo: Arc<dyn SampleRepository>,
        tokens: Arc<dyn TokenAuthority>,
        notifier: Arc<dyn SampleNotifier>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repo,
            tokens,
            notifier,
            locks: KeyedLocks::new(),
            settings,
        }
    }

    /// Registers a new sample and returns it with its one-time access token.
    ///
    /// The plaintext token is only ever returned here. A generated ID that
    /// already exists is replaced by a fresh one, up to `id_attempts` times.
    pub async fn create_sample(&self, new: NewSample) -> Result<CreatedSample> {
        validate_new_sample(&new)?;

        let token = self.tokens.generate(self.settings.token_length);
        let hash = self.hash_token(token.clone()).await?;

        let mut attempt = 1;
        loop {
            let sample_id = generate_sample_id(self.settings.sample_id_length);
            let sample = Sample::from_new(sample_id, new.clone(), hash.clone());

            match self.store(self.repo.insert_sample(&sample)).await {
                Ok(()) => {
                    tracing::info!(sample_id = %sample.sample_id, "Sample created");
                    return Ok(CreatedSample {
                        sample: sample.view(),
                        access_token: token,
                    });
                }
                Err(ServiceError::Conflict(id)) if attempt < self.settings.id_attempts => {
                    tracing::warn!(sample_id = %id, attempt, "Sample ID collision, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the caller-visible view of a sample if `token` matches.
    pub async fn retrieve_sample(&self, sample_id: &str, token: &str) -> Result<SampleView> {
        let sample = self.load(sample_id).await?;
        self.authorize(&sample, token).await?;
        Ok(sample.view())
    }

    /// Applies an update presented with an access token.
    pub async fn update_sample(&self, update: &SampleUpdate, token: &str) -> Result<SampleView> {
        validate_update(update)?;

        let guard = self.locks.lock(&update.sample_id).await;
        let sample = self.load(&update.sample_id).await?;
        self.authorize(&sample, token).await?;

        self.commit(guard, sample, update).await
    }

    /// Applies an update that arrived over the internal event channel.
    ///
    /// No token is checked. Only the relay calls this.
    pub async fn apply_trusted_update(&self, update: &SampleUpdate) -> Result<SampleView> {
        validate_update(update)?;

        let guard = self.locks.lock(&update.sample_id).await;
        let sample = self.load(&update.sample_id).await?;

        self.commit(guard, sample, update).await
    }

    async fn load(&self, sample_id: &str) -> Result<Sample> {
        self.store(self.repo.get_sample(sample_id)).await
    }

    /// Writes the update, then notifies.
    ///
    /// Both steps run on a spawned task that owns the key lock, so they
    /// complete even when the caller is dropped mid-way.
    async fn commit(
        &self,
        guard: KeyGuard,
        mut sample: Sample,
        update: &SampleUpdate,
    ) -> Result<SampleView> {
        update.apply_to(&mut sample);
        let service = self.clone();

        let task = tokio::spawn(async move {
            let _guard = guard;
            service.store(service.repo.replace_sample(&sample)).await?;

            tracing::info!(
                sample_id = %sample.sample_id,
                status = sample.status.as_str(),
                test_result = sample.test_result.as_str(),
                "Sample updated"
            );

            service.notify(&sample).await;
            Ok::<_, ServiceError>(sample.view())
        });

        task.await.map_err(|e| ServiceError::Task(e.to_string()))?
    }

    async fn authorize(&self, sample: &Sample, token: &str) -> Result<()> {
        let tokens = Arc::clone(&self.tokens);
        let token = token.to_string();
        let hash = sample.access_token_hash.clone();

        let verified = tokio::task::spawn_blocking(move || tokens.verify(&token, &hash))
            .await
            .map_err(|e| TokenError::Hashing(e.to_string()))?;

        if verified {
            Ok(())
        } else {
            tracing::warn!(sample_id = %sample.sample_id, "Access token rejected");
            Err(ServiceError::Unauthorized)
        }
    }

    async fn hash_token(&self, token: String) -> Result<String> {
        let tokens = Arc::clone(&self.tokens);

        let hash = tokio::task::spawn_blocking(move || tokens.hash(&token))
            .await
            .map_err(|e| TokenError::Hashing(e.to_string()))??;

        Ok(hash)
    }

    async fn store<T>(&self, call: impl Future<Output = storage::Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.settings.store_timeout, call).await {
            Ok(result) => result.map_err(ServiceError::from),
            Err(_) => {
                tracing::error!(timeout = ?self.settings.store_timeout, "Storage call timed out");
                Err(ServiceError::Timeout)
            }
        }
    }

    /// Delivers the update notification. Failures are logged, never returned:
    /// the persisted update stands either way.
    async fn notify(&self, sample: &Sample) {
        let payload = sample.notification();
        let attempts = self.settings.notify_attempts.max(1);

        for attempt in 1..=attempts {
            let delivery = self.notifier.sample_updated(&payload);
            let result = match tokio::time::timeout(self.settings.notify_timeout, delivery).await {
                Ok(result) => result,
                Err(_) => Err(EventError::PublishFailed(format!(
                    "timed out after {:?}",
                    self.settings.notify_timeout
                ))),
            };

            match result {
                Ok(()) => {
                    tracing::debug!(sample_id = %payload.sample_id, attempt, "Update notification sent");
                    return;
                }
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        sample_id = %payload.sample_id,
                        attempt,
                        error = %e,
                        "Update notification failed, retrying"
                    );
                    tokio::time::sleep(self.settings.notify_backoff * attempt).await;
                }
                Err(e) => {
                    tracing::error!(
                        sample_id = %payload.sample_id,
                        attempts,
                        error = %e,
                        "Update notification dropped"
                    );
                }
            }
        }
    }
}
