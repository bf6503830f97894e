use serde::{Deserialize, Serialize};

use crate::domain::llm::LlmRequest;

/// One concrete combination of generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl ParameterSet {
    pub fn new(temperature: f64, top_p: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            top_p,
            max_tokens,
        }
    }

    /// Build the provider request for `prompt` using these parameters
    pub fn to_request(&self, prompt: &str) -> LlmRequest {
        LlmRequest::builder()
            .user(prompt)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .max_tokens(self.max_tokens)
            .build()
    }
}
