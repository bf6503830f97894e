//! Experiment endpoints

use axum::extract::{Path, Query, State};
use tracing::debug;

use super::middleware::RequireSession;
use super::state::AppState;
use super::types::{ApiError, ApiResponse, CreateExperimentRequest, ExperimentDto, HistoryQuery, Json};

/// POST /api/experiments
pub async fn create_experiment(
    State(state): State<AppState>,
    RequireSession(session_id): RequireSession,
    Json(request): Json<CreateExperimentRequest>,
) -> Result<ApiResponse<ExperimentDto>, ApiError> {
    let (prompt, range) = request.into_parts()?;

    debug!(
        session_id = %session_id,
        prompt_chars = prompt.chars().count(),
        temperature_min = range.temperature_min,
        temperature_max = range.temperature_max,
        top_p_min = range.top_p_min,
        top_p_max = range.top_p_max,
        max_tokens = range.max_tokens,
        "Create experiment request"
    );

    let experiment = state
        .experiment_service
        .create(&session_id, &prompt, range)
        .await?;

    Ok(ApiResponse::created(ExperimentDto::from(&experiment))
        .with_message("Experiment created successfully"))
}

/// GET /api/experiments/history
pub async fn get_history(
    State(state): State<AppState>,
    RequireSession(session_id): RequireSession,
    Query(query): Query<HistoryQuery>,
) -> Result<ApiResponse<Vec<ExperimentDto>>, ApiError> {
    let experiments = state
        .experiment_service
        .history(&session_id, query.limit)
        .await?;

    Ok(
        ApiResponse::ok(experiments.iter().map(ExperimentDto::from).collect())
            .with_message("Experiment history retrieved successfully"),
    )
}

/// GET /api/experiments/{experiment_id}
pub async fn get_experiment(
    State(state): State<AppState>,
    RequireSession(session_id): RequireSession,
    Path(experiment_id): Path<String>,
) -> Result<ApiResponse<ExperimentDto>, ApiError> {
    let experiment = state
        .experiment_service
        .get(&experiment_id, &session_id)
        .await?;

    Ok(ApiResponse::ok(ExperimentDto::from(&experiment))
        .with_message("Experiment retrieved successfully"))
}
