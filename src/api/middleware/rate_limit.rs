//! Per-client rate limiting middleware

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::config::RateLimitConfig;
use crate::infrastructure::rate_limit::{RateLimitResult, RateLimitRule};

/// Named request budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    General,
    Experiments,
    History,
}

impl Bucket {
    fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Experiments => "experiments",
            Self::History => "history",
        }
    }

    fn rule<'a>(&self, config: &'a RateLimitConfig) -> &'a RateLimitRule {
        match self {
            Self::General => &config.general,
            Self::Experiments => &config.experiments,
            Self::History => &config.history,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::General => "Too many requests from this IP, please try again later.",
            Self::Experiments => {
                "Too many experiment requests. Please wait a few minutes before creating more experiments."
            }
            Self::History => "Too many requests. Please wait a moment before fetching more data.",
        }
    }
}

/// Endpoint-specific bucket applied on top of the general one
fn route_bucket(method: &Method, path: &str) -> Option<Bucket> {
    let path = path.trim_end_matches('/');

    if path == "/api/experiments" && method == Method::POST {
        Some(Bucket::Experiments)
    } else if path.starts_with("/api/experiments/") && method == Method::GET {
        Some(Bucket::History)
    } else {
        None
    }
}

fn client_key(request: &Request<Body>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn apply_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert("ratelimit-limit", HeaderValue::from(result.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(result.remaining));
    headers.insert("ratelimit-reset", HeaderValue::from(result.reset_in_seconds));
}

/// Rejects requests over budget with 429 and the error envelope
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let config = &state.config.rate_limit;

    if !config.enabled {
        return next.run(request).await;
    }

    let client = client_key(&request, config.trust_proxy);
    let buckets = std::iter::once(Bucket::General)
        .chain(route_bucket(request.method(), request.uri().path()));

    let mut tightest: Option<RateLimitResult> = None;

    for bucket in buckets {
        let key = format!("{}:{}", bucket.as_str(), client);
        let result = state
            .rate_limiter
            .check_and_record(&key, bucket.rule(config))
            .await;

        if !result.allowed {
            warn!(client = %client, bucket = bucket.as_str(), "Rate limit exceeded");

            let mut response = ApiError::rate_limited(bucket.message()).into_response();
            apply_headers(response.headers_mut(), &result);
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(result.reset_in_seconds));
            return response;
        }

        if tightest.as_ref().is_none_or(|t| result.remaining < t.remaining) {
            tightest = Some(result);
        }
    }

    let mut response = next.run(request).await;
    if let Some(result) = tightest {
        apply_headers(response.headers_mut(), &result);
    }
    response
}
