//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sampletrack_core::sample::Sample;
use sampletrack_core::storage::{RepositoryError, Result, SampleRepository};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    samples: Arc<RwLock<HashMap<String, Sample>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            samples: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SampleRepository for InMemoryRepository {
    async fn get_sample(&self, sample_id: &str) -> Result<Sample> {
        let samples = self.samples.read().await;
        samples
            .get(sample_id)
            .cloned()
            .ok_or_else(|| RepositoryError::sample_not_found(sample_id))
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<()> {
        let mut samples = self.samples.write().await;
        if samples.contains_key(&sample.sample_id) {
            return Err(RepositoryError::sample_exists(&sample.sample_id));
        }
        samples.insert(sample.sample_id.clone(), sample.clone());
        Ok(())
    }

    async fn replace_sample(&self, sample: &Sample) -> Result<()> {
        let mut samples = self.samples.write().await;
        match samples.get_mut(&sample.sample_id) {
            Some(existing) => {
                *existing = sample.clone();
                Ok(())
            }
            None => Err(RepositoryError::sample_not_found(&sample.sample_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampletrack_core::sample::{NewSample, SampleStatus, SampleUpdate, TestResult};

    fn create_test_sample(id: &str) -> Sample {
        Sample::from_new(
            id,
            NewSample::new("Jonathan K.", "test@test.com", "2023-01-15T11:18"),
            "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA",
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryRepository::new();
        let sample = create_test_sample("AAAAAAAAAA");

        repo.insert_sample(&sample).await.unwrap();

        let fetched = repo.get_sample("AAAAAAAAAA").await.unwrap();
        assert_eq!(fetched, sample);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryRepository::new();

        let result = repo.get_sample("nope").await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails_and_keeps_original() {
        let repo = InMemoryRepository::new();
        let original = create_test_sample("AAAAAAAAAA");
        repo.insert_sample(&original).await.unwrap();

        let mut duplicate = create_test_sample("AAAAAAAAAA");
        duplicate.submitter_email = "other@test.com".to_string();
        let result = repo.insert_sample(&duplicate).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
        let stored = repo.get_sample("AAAAAAAAAA").await.unwrap();
        assert_eq!(stored.submitter_email, "test@test.com");
    }

    #[tokio::test]
    async fn test_replace_overwrites_record() {
        let repo = InMemoryRepository::new();
        let mut sample = create_test_sample("AAAAAAAAAA");
        repo.insert_sample(&sample).await.unwrap();

        SampleUpdate::new(
            "AAAAAAAAAA",
            SampleStatus::Completed,
            TestResult::Positive,
            "2023-01-16T09:00",
        )
        .apply_to(&mut sample);
        repo.replace_sample(&sample).await.unwrap();

        let stored = repo.get_sample("AAAAAAAAAA").await.unwrap();
        assert_eq!(stored.status, SampleStatus::Completed);
        assert_eq!(stored.test_result, TestResult::Positive);
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        let sample = create_test_sample("AAAAAAAAAA");

        let result = repo.replace_sample(&sample).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(repo.get_sample("AAAAAAAAAA").await.is_err());
    }
}
