//! Session header extractor

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::types::ApiError;
use crate::domain::SessionId;

/// Header carrying the anonymous session id
pub const SESSION_HEADER: &str = "x-session-id";

/// Extractor that requires a well-formed `X-Session-ID` header
///
/// Only the format is checked; the session does not have to be known.
#[derive(Debug, Clone, Copy)]
pub struct RequireSession(pub SessionId);

impl<S: Send + Sync> FromRequestParts<S> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Session ID is required in X-Session-ID header")
            })?;

        SessionId::parse(value)
            .map(RequireSession)
            .map_err(|_| ApiError::bad_request("Session ID must be a valid UUID"))
    }
}
