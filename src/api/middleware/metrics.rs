//! HTTP metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

use crate::infrastructure::observability::record_http_request;

/// Records method, route and status of every request
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = route_label(request.extensions().get::<MatchedPath>());

    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &route,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

/// Route template for the label; unmatched paths share one series
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}
