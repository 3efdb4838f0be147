//! Sample API operations.

use sampletrack_core::sample::{CreatedSample, NewSample, SampleUpdate, SampleView};

use super::SampletrackClient;
use crate::error::Result;

impl SampletrackClient {
    /// Register a sample. The returned access token is shown only once.
    pub async fn create_sample(&self, new: &NewSample) -> Result<CreatedSample> {
        let response = self
            .client
            .post(self.url("/samples"))
            .json(new)
            .send()
            .await?;
        self.handle_response(response, "samples").await
    }

    /// Get a sample with its access token.
    pub async fn get_sample(&self, sample_id: &str, token: &str) -> Result<SampleView> {
        let response = self
            .client
            .get(self.url(&format!("/samples/{}", sample_id)))
            .bearer_auth(token)
            .send()
            .await?;
        self.handle_response(response, sample_id).await
    }

    /// Record a test outcome with the sample's access token.
    pub async fn update_sample(&self, update: &SampleUpdate, token: &str) -> Result<()> {
        let response = self
            .client
            .patch(self.url("/samples"))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        self.handle_empty_response(response, &update.sample_id)
            .await
    }
}
