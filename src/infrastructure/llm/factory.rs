use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::mistral::MistralProvider;
use crate::config::ProviderConfig;
use crate::domain::{DomainError, LlmProvider};

/// Builds the generation provider from configuration
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub fn create(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            DomainError::configuration(
                "Provider API key is missing; set provider.api_key or MISTRAL_API_KEY",
            )
        })?;

        let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let provider = MistralProvider::with_base_url(client, api_key, &config.base_url);

        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_key() {
        let config = ProviderConfig {
            api_key: Some("key".to_string()),
            ..ProviderConfig::default()
        };

        let provider = LlmProviderFactory::create(&config).unwrap();
        assert_eq!(provider.provider_name(), "mistral");
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "LLM_PARAM_LAB_TEST_UNSET_KEY".to_string(),
            ..ProviderConfig::default()
        };

        let err = LlmProviderFactory::create(&config).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
