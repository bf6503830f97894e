//! Request/response logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::session::SESSION_HEADER;

/// Logs each request and its outcome. Spans come from `TraceLayer`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);
    let session = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(mask_session_id)
        .unwrap_or_default();

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        session = %session,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

pub(crate) fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Keep only the first segment of a session id in logs
fn mask_session_id(value: &str) -> String {
    match value.split_once('-') {
        Some((head, _)) => format!("{}-****", head),
        None => "****".to_string(),
    }
}
