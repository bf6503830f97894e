use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for text-generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Run a single, non-streaming completion
    async fn generate(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::domain::llm::{Message, Usage};

    /// Provider double that answers from the request it receives.
    ///
    /// Without a fixed response the reply echoes the sampled temperature and
    /// top_p so tests can check which parameter set produced which text.
    #[derive(Debug, Default)]
    pub struct MockLlmProvider {
        response: Option<(String, u32)>,
        error: Option<String>,
        fail_at_temperature: Option<f64>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockLlmProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, text: impl Into<String>, total_tokens: u32) -> Self {
            self.response = Some((text.into(), total_tokens));
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn with_error_at_temperature(mut self, temperature: f64) -> Self {
            self.fail_at_temperature = Some(temperature);
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn generate(
            &self,
            model: &str,
            request: LlmRequest,
        ) -> Result<LlmResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            let temperature = request.temperature.unwrap_or_default();

            if let Some(fail_at) = self.fail_at_temperature {
                if (temperature - fail_at).abs() < f64::EPSILON {
                    return Err(DomainError::provider("mock", "simulated failure"));
                }
            }

            let (text, tokens) = match self.response {
                Some((ref text, tokens)) => (text.clone(), tokens),
                None => (
                    format!(
                        "temperature={:.4} top_p={:.4}",
                        temperature,
                        request.top_p.unwrap_or_default()
                    ),
                    10,
                ),
            };

            Ok(
                LlmResponse::new("mock-id".to_string(), model.to_string(), Message::assistant(text))
                    .with_usage(Usage::new(0, tokens)),
            )
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
