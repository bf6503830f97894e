//! Output of a single generation call

use serde::{Deserialize, Serialize};

use crate::domain::llm::LlmResponse;

/// Text produced by one provider call plus its accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResponse {
    pub text: String,
    pub tokens_used: u32,
    pub latency_ms: u64,
}

impl GeneratedResponse {
    pub fn new(text: impl Into<String>, tokens_used: u32, latency_ms: u64) -> Self {
        Self {
            text: text.into(),
            tokens_used,
            latency_ms,
        }
    }

    /// Build from a provider response and the measured wall-clock latency
    pub fn from_llm(response: &LlmResponse, latency_ms: u64) -> Self {
        Self::new(response.content(), response.total_tokens(), latency_ms)
    }
}
