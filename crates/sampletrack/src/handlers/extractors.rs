//! Bearer token extraction.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use super::AppError;
use crate::service::ServiceError;

/// The token from an `Authorization: Bearer <token>` header.
///
/// A missing or malformed header is rejected the same way as a wrong token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers)
            .map(BearerToken)
            .ok_or(AppError(ServiceError::Unauthorized))
    }
}
