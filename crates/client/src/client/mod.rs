//! HTTP client for the sampletrack API.

pub mod health;
pub mod samples;

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// HTTP client for the sampletrack API.
#[derive(Debug, Clone)]
pub struct SampletrackClient {
    client: reqwest::Client,
    base_url: String,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl SampletrackClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body or turn the response into an error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        if response.status().is_success() {
            return response.json().await.map_err(ClientError::from);
        }
        Err(self.error_from(response, resource).await)
    }

    /// Accept any success status and ignore the body.
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from(response, resource).await)
    }

    async fn error_from(&self, response: reqwest::Response, resource: &str) -> ClientError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error_for_status(status, &body, resource)
    }
}

fn error_for_status(status: u16, body: &str, resource: &str) -> ClientError {
    match status {
        404 => ClientError::NotFound(resource.to_string()),
        403 => ClientError::Unauthorized,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.to_string());
            ClientError::ServerError { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = SampletrackClient::new("http://localhost:3000/");
        assert_eq!(client.url("/samples"), "http://localhost:3000/samples");
    }

    #[test]
    fn test_not_found_and_forbidden() {
        assert!(matches!(
            error_for_status(404, "", "abc"),
            ClientError::NotFound(id) if id == "abc"
        ));
        assert!(matches!(
            error_for_status(403, "", "abc"),
            ClientError::Unauthorized
        ));
    }

    #[test]
    fn test_error_message_from_json_body() {
        let err = error_for_status(400, r#"{"error":"Invalid email address: x"}"#, "samples");
        match err {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid email address: x");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        let err = error_for_status(422, "Failed to deserialize", "samples");
        assert!(matches!(
            err,
            ClientError::ServerError { message, .. } if message == "Failed to deserialize"
        ));
    }
}
