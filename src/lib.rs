//! LLM Parameter Lab
//!
//! Samples four generation parameter sets from user-supplied ranges, runs
//! the same prompt with each of them concurrently and scores every answer
//! on six text-quality dimensions.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::{AppState, ExperimentServiceTrait};
use config::StorageBackend;
use domain::ParameterSampler;
use infrastructure::{
    experiment::{InMemoryExperimentRepository, PostgresExperimentRepository},
    llm::LlmProviderFactory,
    services::{BatchGenerator, ExperimentService, SessionService},
    session::InMemorySessionRepository,
};

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let provider = LlmProviderFactory::create(&config.provider)?;
    info!(
        provider = provider.provider_name(),
        model = %config.provider.model,
        "Generation provider configured"
    );

    let generator = BatchGenerator::new(provider, config.provider.model.clone());
    let sampler = ParameterSampler::new(config.provider.max_temperature);
    let history_limit = config.experiments.history_limit;

    let experiment_service: Arc<dyn ExperimentServiceTrait> = match config.storage.backend {
        StorageBackend::InMemory => {
            info!("Using in-memory experiment storage");
            Arc::new(
                ExperimentService::new(
                    Arc::new(InMemoryExperimentRepository::new()),
                    generator,
                    sampler,
                )
                .with_history_limit(history_limit),
            )
        }
        StorageBackend::Postgres => {
            let database_url = config
                .storage
                .resolved_database_url()
                .context("storage.database_url or DATABASE_URL is required for postgres storage")?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&database_url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            let repository = PostgresExperimentRepository::new(pool);
            repository.ensure_schema().await?;
            info!("PostgreSQL experiment storage ready");

            Arc::new(
                ExperimentService::new(Arc::new(repository), generator, sampler)
                    .with_history_limit(history_limit),
            )
        }
    };

    let session_service = Arc::new(SessionService::new(Arc::new(
        InMemorySessionRepository::new(),
    )));

    Ok(AppState::new(
        experiment_service,
        session_service,
        config.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[tokio::test]
    async fn test_state_requires_api_key() {
        let config = AppConfig {
            provider: ProviderConfig {
                api_key: None,
                api_key_env: "LLM_PARAM_LAB_TEST_NO_KEY".to_string(),
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_state() {
        let config = AppConfig {
            provider: ProviderConfig {
                api_key: Some("test-key".to_string()),
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };

        let state = create_app_state_with_config(&config).await.unwrap();
        assert_eq!(state.session_service.count().await.unwrap(), 0);
        assert_eq!(state.experiment_service.count().await.unwrap(), 0);
    }
}
