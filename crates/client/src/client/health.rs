//! Health check operations.

use serde::{Deserialize, Serialize};

use super::SampletrackClient;
use crate::error::Result;

/// Readiness probe response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub healthy: bool,
}

impl SampletrackClient {
    /// Liveness probe.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response, "livez").await
    }

    /// Readiness probe.
    pub async fn readyz(&self) -> Result<Readiness> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        self.handle_response(response, "readyz").await
    }
}
