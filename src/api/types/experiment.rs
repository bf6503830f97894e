//! Experiment request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Experiment, ParameterRange, ResponseRecord};

/// Body of `POST /api/experiments`
///
/// The range is read from `parameters` when present, otherwise from the
/// top-level fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperimentRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub parameters: Option<ParameterRange>,
    #[serde(flatten)]
    pub inline: Option<ParameterRange>,
}

impl CreateExperimentRequest {
    pub fn into_parts(self) -> Result<(String, ParameterRange), DomainError> {
        let prompt = self
            .prompt
            .ok_or_else(|| DomainError::validation("Prompt is required"))?;
        let range = self.parameters.or(self.inline).ok_or_else(|| {
            DomainError::validation(
                "Parameters are required: temperatureMin, temperatureMax, topPMin, topPMax, maxTokens",
            )
        })?;

        Ok((prompt, range))
    }
}

/// Query of `GET /api/experiments/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentDto {
    pub id: String,
    pub session_id: String,
    pub prompt: String,
    pub responses: Vec<ResponseDto>,
    pub created_at: DateTime<Utc>,
}

/// One response flattened into a single row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub id: String,
    pub text: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub tokens_used: u32,
    pub latency_ms: u64,
    pub metrics_overall: f64,
    pub metrics_length: f64,
    pub metrics_coherence: f64,
    pub metrics_structure: f64,
    pub metrics_readability: f64,
    pub metrics_completeness: f64,
    pub metrics_specificity: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&ResponseRecord> for ResponseDto {
    fn from(record: &ResponseRecord) -> Self {
        Self {
            id: record.id.to_string(),
            text: record.generated.text.clone(),
            temperature: record.parameters.temperature,
            top_p: record.parameters.top_p,
            max_tokens: record.parameters.max_tokens,
            tokens_used: record.generated.tokens_used,
            latency_ms: record.generated.latency_ms,
            metrics_overall: record.metrics.overall,
            metrics_length: record.metrics.length,
            metrics_coherence: record.metrics.coherence,
            metrics_structure: record.metrics.structure,
            metrics_readability: record.metrics.readability,
            metrics_completeness: record.metrics.completeness,
            metrics_specificity: record.metrics.specificity,
            created_at: record.created_at,
        }
    }
}

impl From<&Experiment> for ExperimentDto {
    fn from(experiment: &Experiment) -> Self {
        Self {
            id: experiment.id().to_string(),
            session_id: experiment.session_id().to_string(),
            prompt: experiment.prompt().to_string(),
            responses: experiment.responses().iter().map(ResponseDto::from).collect(),
            created_at: experiment.created_at(),
        }
    }
}
