//! JSON extractor whose rejections use the API error envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::Json` that reports malformed bodies as `ApiError`
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::new(
                rejection.status(),
                format_rejection_message(&rejection),
            )),
        }
    }
}

fn format_rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        JsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
