//! Sample handlers.
//!
//! Thin wrappers over [`crate::service::SampleService`]. Enum fields are
//! checked by the JSON extractor, everything else by the service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use sampletrack_core::sample::{CreatedSample, NewSample, SampleUpdate, SampleView};

use super::{extractors::BearerToken, AppError};
use crate::state::AppState;

/// POST /samples
pub async fn create_sample(
    State(state): State<AppState>,
    Json(new): Json<NewSample>,
) -> Result<(StatusCode, Json<CreatedSample>), AppError> {
    let created = state.service.create_sample(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /samples/{sample_id}
pub async fn get_sample(
    State(state): State<AppState>,
    Path(sample_id): Path<String>,
    BearerToken(token): BearerToken,
) -> Result<Json<SampleView>, AppError> {
    let view = state.service.retrieve_sample(&sample_id, &token).await?;
    Ok(Json(view))
}

/// PATCH /samples
pub async fn update_sample(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(update): Json<SampleUpdate>,
) -> Result<StatusCode, AppError> {
    state.service.update_sample(&update, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}
