use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::middleware::{
    logging_middleware, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    SESSION_HEADER,
};
use super::state::AppState;
use super::types::ApiError;
use super::{experiments, health, sessions};
use crate::config::CorsConfig;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

fn session_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(sessions::create_session))
        .route("/validate/{session_id}", get(sessions::validate_session))
        .route("/stats", get(sessions::session_stats))
}

fn experiment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(experiments::create_experiment))
        .route("/history", get(experiments::get_history))
        .route("/{experiment_id}", get(experiments::get_experiment))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)])
}

/// Create the full router with application state
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let cors = cors_layer(&state.config.cors);
    let metrics_path = state.config.metrics.path.clone();

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/session", session_router())
        .nest("/api/experiments", experiment_router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m, &metrics_path));
    }

    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{ParameterSampler, SessionId};
    use crate::infrastructure::experiment::InMemoryExperimentRepository;
    use crate::infrastructure::rate_limit::RateLimitRule;
    use crate::infrastructure::services::{BatchGenerator, ExperimentService, SessionService};
    use crate::infrastructure::session::InMemorySessionRepository;

    const ANSWER: &str = "Temperature controls randomness. Lower values give focused answers.\n\n\
                          For example, 0.2 suits factual questions while 1.2 suits brainstorming.";

    fn app_with_config(config: AppConfig) -> Router {
        let provider = MockLlmProvider::new().with_response(ANSWER, 42);
        let generator = BatchGenerator::new(Arc::new(provider), "mistral-small-latest");
        let experiments = ExperimentService::new(
            Arc::new(InMemoryExperimentRepository::new()),
            generator,
            ParameterSampler::default(),
        );
        let sessions = SessionService::new(Arc::new(InMemorySessionRepository::new()));

        let state = AppState::new(Arc::new(experiments), Arc::new(sessions), config);
        create_router(state, None)
    }

    fn app() -> Router {
        app_with_config(AppConfig::default())
    }

    fn experiment_body() -> Value {
        json!({
            "prompt": "How does temperature change an answer?",
            "parameters": {
                "temperatureMin": 0.2,
                "temperatureMax": 1.2,
                "topPMin": 0.7,
                "topPMax": 0.95,
                "maxTokens": 300
            }
        })
    }

    fn post_json(uri: &str, session: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(session) = session {
            builder = builder.header(SESSION_HEADER, session);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(session) = session {
            builder = builder.header(SESSION_HEADER, session);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get("/health", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["activeSessions"], 0);
        assert_eq!(body["data"]["environment"], "development");
        assert!(body["data"]["uptime"].is_number());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app();

        let (status, created) = send(&app, post_json("/api/session/create", None, &json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let session_id = created["data"]["sessionId"].as_str().unwrap().to_string();

        let (status, validated) =
            send(&app, get(&format!("/api/session/validate/{}", session_id), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(validated["data"]["valid"], true);
        assert!(validated["data"]["lastAccessedAt"].is_string());

        let (status, stats) = send(&app, get("/api/session/stats", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["data"]["activeSessions"], 1);
    }

    #[tokio::test]
    async fn test_validate_session_errors() {
        let app = app();

        let (status, body) = send(&app, get("/api/session/validate/nope", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid session ID format");

        // version 1 UUIDs are not session ids
        let (status, _) = send(
            &app,
            get("/api/session/validate/6ba7b810-9dad-11d1-80b4-00c04fd430c8", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = SessionId::generate().to_string();
        let (status, body) =
            send(&app, get(&format!("/api/session/validate/{}", unknown), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");
    }

    #[tokio::test]
    async fn test_create_experiment_requires_session() {
        let (status, body) =
            send(&app(), post_json("/api/experiments", None, &experiment_body())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_experiment_round_trip() {
        let app = app();
        let session = SessionId::generate().to_string();

        let (status, created) = send(
            &app,
            post_json("/api/experiments", Some(session.as_str()), &experiment_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "Experiment created successfully");

        let data = &created["data"];
        let responses = data["responses"].as_array().unwrap();
        assert_eq!(responses.len(), 4);
        for response in responses {
            let temperature = response["temperature"].as_f64().unwrap();
            let top_p = response["topP"].as_f64().unwrap();
            assert!((0.2..=1.2).contains(&temperature));
            assert!((0.7..=0.95).contains(&top_p));
            assert_eq!(response["maxTokens"], 300);
            assert_eq!(response["tokensUsed"], 42);
            assert!(response["metricsOverall"].as_f64().unwrap() > 0.0);
        }

        let id = data["id"].as_str().unwrap();
        let (status, fetched) =
            send(&app, get(&format!("/api/experiments/{}", id), Some(session.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["id"], id);
        assert_eq!(fetched["data"]["responses"], data["responses"]);

        let (status, history) = send(&app, get("/api/experiments/history", Some(session.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_experiment_is_scoped_to_session() {
        let app = app();
        let owner = SessionId::generate().to_string();
        let stranger = SessionId::generate().to_string();

        let (_, created) =
            send(&app, post_json("/api/experiments", Some(owner.as_str()), &experiment_body())).await;
        let id = created["data"]["id"].as_str().unwrap();

        let (status, body) =
            send(&app, get(&format!("/api/experiments/{}", id), Some(stranger.as_str()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Experiment not found");

        let (_, history) = send(&app, get("/api/experiments/history", Some(stranger.as_str()))).await;
        assert!(history["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_range_is_bad_request() {
        let mut body = experiment_body();
        body["parameters"]["temperatureMin"] = json!(1.5);
        body["parameters"]["temperatureMax"] = json!(0.5);
        let session = SessionId::generate().to_string();

        let (status, response) =
            send(&app(), post_json("/api/experiments", Some(session.as_str()), &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_experiment_id() {
        let session = SessionId::generate().to_string();
        let (status, _) = send(&app(), get("/api/experiments/not-a-uuid", Some(session.as_str()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_experiment_bucket_rate_limited() {
        let mut config = AppConfig::default();
        config.rate_limit.experiments = RateLimitRule::new(1, 300);
        let app = app_with_config(config);
        let session = SessionId::generate().to_string();

        let (status, _) = send(
            &app,
            post_json("/api/experiments", Some(session.as_str()), &experiment_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(post_json("/api/experiments", Some(session.as_str()), &experiment_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("retry-after"));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        // Reads use their own bucket
        let (status, _) = send(&app, get("/api/experiments/history", Some(session.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(&app(), get("/api/unknown", None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Route not found");
    }
}
