use async_trait::async_trait;

use crate::sample::Sample;

use super::Result;

/// Keyed storage for sample records.
///
/// Point operations only: lookup by id, insert, and full-record replace.
#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// Gets a sample by its ID.
    ///
    /// Fails with [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// when no sample has that ID.
    async fn get_sample(&self, sample_id: &str) -> Result<Sample>;

    /// Inserts a new sample. Fails with `AlreadyExists` if the ID is taken.
    async fn insert_sample(&self, sample: &Sample) -> Result<()>;

    /// Overwrites an existing sample. Fails with `NotFound` if absent.
    async fn replace_sample(&self, sample: &Sample) -> Result<()>;
}
