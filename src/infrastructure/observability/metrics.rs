//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;
use crate::domain::QualityMetrics;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("valid uuid regex")
});

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("valid numeric segment regex"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("llm_param_lab_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// One provider call as seen by the batch generator
pub struct GenerationCallMetric<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub duration: Duration,
    pub success: bool,
    pub tokens: Option<u64>,
}

/// Record a provider call
pub fn record_generation_call(params: GenerationCallMetric<'_>) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("model", params.model.to_string()),
        ("status", if params.success { "success" } else { "error" }.to_string()),
    ];

    counter!("generation_requests_total", &labels).increment(1);
    histogram!("generation_request_duration_seconds", &labels)
        .record(params.duration.as_secs_f64());

    if let Some(tokens) = params.tokens {
        counter!("generation_tokens_total", &labels).increment(tokens);
    }
}

pub fn record_experiment_created() {
    counter!("experiments_created_total").increment(1);
}

pub fn record_experiment_failed(reason: &'static str) {
    counter!("experiments_failed_total", "reason" => reason).increment(1);
}

/// Record every dimension of a response's quality scores
pub fn record_quality_scores(scores: &QualityMetrics) {
    let dimensions = [
        ("overall", scores.overall),
        ("coherence", scores.coherence),
        ("structure", scores.structure),
        ("completeness", scores.completeness),
        ("readability", scores.readability),
        ("length", scores.length),
        ("specificity", scores.specificity),
    ];

    for (dimension, value) in dimensions {
        histogram!("response_quality_score", "dimension" => dimension).record(value);
    }
}

/// Sanitize URL path for metric labels (remove IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    path.chars().take(50).collect()
}
