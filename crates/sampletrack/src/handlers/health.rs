//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe

use axum::{http::StatusCode, Json};

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Backends are connected during startup, so a serving process is ready.
pub async fn readyz() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "healthy": true })))
}
