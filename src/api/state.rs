//! Application state for shared services

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::domain::{
    DomainError, Experiment, ExperimentRepository, ParameterRange, Session, SessionId,
    SessionRepository,
};
use crate::infrastructure::rate_limit::RateLimiter;
use crate::infrastructure::services::{ExperimentService, SessionService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub experiment_service: Arc<dyn ExperimentServiceTrait>,
    pub session_service: Arc<dyn SessionServiceTrait>,
    pub rate_limiter: Arc<RateLimiter>,
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        experiment_service: Arc<dyn ExperimentServiceTrait>,
        session_service: Arc<dyn SessionServiceTrait>,
        config: AppConfig,
    ) -> Self {
        let retention = Duration::from_secs(config.rate_limit.longest_window_secs());

        Self {
            experiment_service,
            session_service,
            rate_limiter: Arc::new(RateLimiter::new(retention)),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Trait for experiment service operations
#[async_trait::async_trait]
pub trait ExperimentServiceTrait: Send + Sync {
    async fn create(
        &self,
        session_id: &SessionId,
        prompt: &str,
        range: ParameterRange,
    ) -> Result<Experiment, DomainError>;
    async fn get(&self, id: &str, session_id: &SessionId) -> Result<Experiment, DomainError>;
    async fn history(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<Experiment>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for session service operations
#[async_trait::async_trait]
pub trait SessionServiceTrait: Send + Sync {
    async fn create(&self) -> Result<Session, DomainError>;
    async fn get(&self, id: &str) -> Result<Session, DomainError>;
    fn is_valid_id(&self, id: &str) -> bool;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: ExperimentRepository + 'static> ExperimentServiceTrait for ExperimentService<R> {
    async fn create(
        &self,
        session_id: &SessionId,
        prompt: &str,
        range: ParameterRange,
    ) -> Result<Experiment, DomainError> {
        ExperimentService::create(self, session_id, prompt, range).await
    }

    async fn get(&self, id: &str, session_id: &SessionId) -> Result<Experiment, DomainError> {
        ExperimentService::get(self, id, session_id).await
    }

    async fn history(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<Experiment>, DomainError> {
        ExperimentService::history(self, session_id, limit).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        ExperimentService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: SessionRepository + 'static> SessionServiceTrait for SessionService<R> {
    async fn create(&self) -> Result<Session, DomainError> {
        SessionService::create(self).await
    }

    async fn get(&self, id: &str) -> Result<Session, DomainError> {
        SessionService::get(self, id).await
    }

    fn is_valid_id(&self, id: &str) -> bool {
        SessionService::is_valid_id(self, id)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        SessionService::count(self).await
    }
}
