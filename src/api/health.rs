//! Health check endpoint

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::state::AppState;
use super::types::ApiResponse;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub environment: String,
    pub active_sessions: usize,
    /// Seconds since the state was built
    pub uptime: f64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let (status, active_sessions) = match state.session_service.count().await {
        Ok(count) => (HealthStatus::Healthy, count),
        Err(e) => {
            warn!(error = %e, "Session store unavailable during health check");
            (HealthStatus::Degraded, 0)
        }
    };

    ApiResponse::ok(HealthResponse {
        status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.server.environment.clone(),
        active_sessions,
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
