//! Success envelope shared by all endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{ success: true, data, message?, timestamp }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            timestamp: Utc::now(),
            status: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let response = ApiResponse::ok(42).with_message("done");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert_eq!(json["message"], "done");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_message_is_optional() {
        let json = serde_json::to_value(ApiResponse::ok("x")).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_created_status() {
        let response = ApiResponse::created(()).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
