//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_experiment_created, record_experiment_failed,
    record_generation_call, record_http_request, record_quality_scores, GenerationCallMetric,
    PrometheusMetrics,
};
