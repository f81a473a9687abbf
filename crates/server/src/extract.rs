use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::errors::ApiError;

/// Raw bearer token pulled from `Authorization: Bearer <token>`.
///
/// Only the transport framing is checked here; handlers hand the string to
/// the auth service for verification and role checks.
pub struct Bearer(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Bearer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("invalid authorization header (expect Bearer)"))?;
        if token.is_empty() {
            return Err(ApiError::unauthorized("empty bearer token"));
        }
        Ok(Bearer(token.to_string()))
    }
}
