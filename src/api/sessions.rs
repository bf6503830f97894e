//! Anonymous session endpoints

use axum::extract::{Path, State};

use super::state::AppState;
use super::types::{ApiError, ApiResponse, SessionCreated, SessionStats, SessionValidation};

/// POST /api/session/create
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionCreated>, ApiError> {
    let session = state.session_service.create().await?;

    Ok(ApiResponse::created(SessionCreated::from(&session))
        .with_message("Session created successfully"))
}

/// GET /api/session/validate/{session_id}
pub async fn validate_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<SessionValidation>, ApiError> {
    if !state.session_service.is_valid_id(&session_id) {
        return Err(ApiError::bad_request("Invalid session ID format"));
    }

    let session = state.session_service.get(&session_id).await?;
    Ok(ApiResponse::ok(SessionValidation::from(&session)))
}

/// GET /api/session/stats
pub async fn session_stats(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionStats>, ApiError> {
    let active_sessions = state.session_service.count().await?;
    Ok(ApiResponse::ok(SessionStats { active_sessions }))
}
