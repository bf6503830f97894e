//! Error envelope returned by every endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// `{ success: false, error, timestamp }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                success: false,
                error: message.into(),
                timestamp: Utc::now(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        &self.response.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "Request rejected");
        }

        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } | DomainError::InvalidId { message } => {
                Self::bad_request(message)
            }
            DomainError::Provider { provider, message } => {
                tracing::error!(provider = %provider, error = %message, "Generation provider failed");
                Self::bad_gateway("Failed to generate responses")
            }
            DomainError::Configuration { message }
            | DomainError::Internal { message }
            | DomainError::Storage { message } => {
                tracing::error!(error = %message, "Request failed with server error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}
