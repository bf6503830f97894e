//! Runs one prompt against every sampled parameter set concurrently

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::domain::parameters::BATCH_SIZE;
use crate::domain::{DomainError, GeneratedResponse, LlmProvider, ParameterSet};
use crate::infrastructure::observability::{record_generation_call, GenerationCallMetric};

/// Fans a prompt out to the provider, one call per parameter set.
///
/// All calls run overlapped. The batch succeeds only if every call
/// succeeds; the first failure is returned and the remaining calls are
/// dropped.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl BatchGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_batch(
        &self,
        prompt: &str,
        sets: &[ParameterSet; BATCH_SIZE],
    ) -> Result<[GeneratedResponse; BATCH_SIZE], DomainError> {
        info!(
            count = sets.len(),
            model = %self.model,
            prompt = %truncate(prompt, 50),
            "Starting batch generation"
        );

        let calls = sets.iter().map(|set| self.generate_one(prompt, set));
        let responses = try_join_all(calls).await?;

        let total_tokens: u64 = responses.iter().map(|r| u64::from(r.tokens_used)).sum();
        let avg_latency_ms =
            responses.iter().map(|r| r.latency_ms).sum::<u64>() / responses.len().max(1) as u64;

        info!(
            count = responses.len(),
            total_tokens,
            avg_latency_ms,
            "Batch generation completed"
        );

        responses.try_into().map_err(|v: Vec<GeneratedResponse>| {
            DomainError::internal(format!(
                "Expected {} responses from batch, got {}",
                BATCH_SIZE,
                v.len()
            ))
        })
    }

    async fn generate_one(
        &self,
        prompt: &str,
        set: &ParameterSet,
    ) -> Result<GeneratedResponse, DomainError> {
        let started = Instant::now();
        let result = self.provider.generate(&self.model, set.to_request(prompt)).await;
        let elapsed = started.elapsed();

        match result {
            Ok(response) => {
                let generated = GeneratedResponse::from_llm(&response, millis(elapsed));
                self.record(elapsed, true, Some(u64::from(generated.tokens_used)));

                debug!(
                    temperature = set.temperature,
                    top_p = set.top_p,
                    tokens_used = generated.tokens_used,
                    latency_ms = generated.latency_ms,
                    "Generation call completed"
                );

                Ok(generated)
            }
            Err(e) => {
                self.record(elapsed, false, None);

                warn!(
                    temperature = set.temperature,
                    top_p = set.top_p,
                    latency_ms = millis(elapsed),
                    error = %e,
                    "Generation call failed"
                );

                Err(e)
            }
        }
    }

    fn record(&self, duration: Duration, success: bool, tokens: Option<u64>) {
        record_generation_call(GenerationCallMetric {
            provider: self.provider.provider_name(),
            model: &self.model,
            duration,
            success,
            tokens,
        });
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Shortens text for log fields on a character boundary
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    fn sets() -> [ParameterSet; BATCH_SIZE] {
        [
            ParameterSet::new(0.2, 0.5, 200),
            ParameterSet::new(0.6, 0.7, 200),
            ParameterSet::new(1.0, 0.8, 200),
            ParameterSet::new(1.4, 0.95, 200),
        ]
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let provider = Arc::new(MockLlmProvider::new());
        let generator = BatchGenerator::new(provider.clone(), "mistral-small-latest");

        let responses = generator.generate_batch("prompt", &sets()).await.unwrap();

        assert_eq!(provider.calls(), 4);
        for (response, set) in responses.iter().zip(sets()) {
            let expected = format!("temperature={:.4} top_p={:.4}", set.temperature, set.top_p);
            assert_eq!(response.text, expected);
            assert_eq!(response.tokens_used, 10);
        }
    }

    #[tokio::test]
    async fn test_single_failure_fails_batch() {
        let provider = Arc::new(MockLlmProvider::new().with_error_at_temperature(1.0));
        let generator = BatchGenerator::new(provider, "m");

        let err = generator.generate_batch("prompt", &sets()).await.unwrap_err();
        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_all_failures_fail_batch() {
        let provider = Arc::new(MockLlmProvider::new().with_error("quota exceeded"));
        let generator = BatchGenerator::new(provider, "m");

        let err = generator.generate_batch("prompt", &sets()).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_calls_run_concurrently() {
        let delay = Duration::from_millis(200);
        let provider = Arc::new(MockLlmProvider::new().with_delay(delay));
        let generator = BatchGenerator::new(provider, "m");

        let started = Instant::now();
        let responses = generator.generate_batch("prompt", &sets()).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(responses.len(), 4);
        assert!(responses.iter().all(|r| r.latency_ms >= 200));
        assert!(elapsed < delay * 3, "calls ran sequentially: {elapsed:?}");
    }

    #[tokio::test]
    async fn test_fixed_response_passes_through() {
        let provider = Arc::new(MockLlmProvider::new().with_response("Hello.", 7));
        let generator = BatchGenerator::new(provider, "m");

        let responses = generator.generate_batch("prompt", &sets()).await.unwrap();
        assert!(responses.iter().all(|r| r.text == "Hello." && r.tokens_used == 7));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
        assert_eq!(truncate("héllo wörld", 3), "hél...");
    }
}
