use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sampletrack_core::storage::repository_error_to_status_code;

use crate::service::ServiceError;

/// Handler error carrying a [`ServiceError`] to the HTTP boundary.
///
/// Rendered as `{"error": "<message>"}`. Server-side faults are logged and
/// answered with a generic message.
pub struct AppError(pub ServiceError);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Storage(e) => StatusCode::from_u16(repository_error_to_status_code(e))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ServiceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
            "Something went wrong".to_string()
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
            self.0.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}
