use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage,
};

pub const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai";

const PROVIDER_NAME: &str = "mistral";

/// Mistral chat completions provider (OpenAI-compatible wire format)
#[derive(Debug)]
pub struct MistralProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> MistralProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_MISTRAL_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<ChatMessage> = request
            .messages
            .iter()
            .map(ChatMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: ChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::parse(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            });
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for MistralProvider<C> {
    async fn generate(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => {
                    DomainError::provider(PROVIDER_NAME, message)
                }
                other => other,
            })?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn from_domain(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
