//! Experiment service
//!
//! Orchestrates one experiment end to end: validate the input, sample
//! four parameter sets, generate the responses concurrently, score each
//! one, assemble the experiment and store it atomically.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::batch_generator::{truncate, BatchGenerator};
use crate::domain::experiment::{assemble, validate_prompt};
use crate::domain::{
    DomainError, Experiment, ExperimentId, ExperimentRepository, ParameterRange, ParameterSampler,
    QualityMetrics, QualityScorer, SessionId,
};
use crate::infrastructure::observability::{
    record_experiment_created, record_experiment_failed, record_quality_scores,
};

/// Default number of experiments returned by history
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Upper bound on a single history page
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Service running and retrieving parameter experiments
#[derive(Debug)]
pub struct ExperimentService<R: ExperimentRepository> {
    repository: Arc<R>,
    generator: BatchGenerator,
    sampler: ParameterSampler,
    scorer: QualityScorer,
    history_limit: usize,
}

impl<R: ExperimentRepository> ExperimentService<R> {
    /// Create a new experiment service
    pub fn new(repository: Arc<R>, generator: BatchGenerator, sampler: ParameterSampler) -> Self {
        Self {
            repository,
            generator,
            sampler,
            scorer: QualityScorer::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        self
    }

    /// Run a new experiment for the session
    pub async fn create(
        &self,
        session_id: &SessionId,
        prompt: &str,
        range: ParameterRange,
    ) -> Result<Experiment, DomainError> {
        let prompt = validate_prompt(prompt)?;
        range.validate()?;

        info!(
            session_id = %session_id,
            prompt = %truncate(prompt, 50),
            "Creating experiment"
        );

        let sets = {
            let mut rng = rand::thread_rng();
            self.sampler.sample(&range, &mut rng)
        };

        let responses = match self.generator.generate_batch(prompt, &sets).await {
            Ok(responses) => responses,
            Err(e) => {
                record_experiment_failed("generation");
                error!(session_id = %session_id, error = %e, "Experiment generation failed");
                return Err(e);
            }
        };

        let metrics: Vec<QualityMetrics> = responses
            .iter()
            .map(|r| {
                let scores = self.scorer.score(&r.text, r.tokens_used);
                debug!(
                    overall = scores.overall,
                    tokens_used = r.tokens_used,
                    "Metrics calculated"
                );
                record_quality_scores(&scores);
                scores
            })
            .collect();

        let experiment = assemble(prompt, *session_id, &sets, responses.into(), &metrics)?;

        let created = match self.repository.create(experiment).await {
            Ok(created) => created,
            Err(e) => {
                record_experiment_failed("storage");
                error!(session_id = %session_id, error = %e, "Failed to store experiment");
                return Err(e);
            }
        };

        record_experiment_created();
        let best = created.best_response();
        info!(
            experiment_id = %created.id(),
            session_id = %session_id,
            responses = created.responses().len(),
            best_overall = best.map(|r| r.metrics.overall),
            best_temperature = best.map(|r| r.parameters.temperature),
            "Experiment created"
        );

        Ok(created)
    }

    /// Get an experiment owned by the session
    pub async fn get(
        &self,
        id: &str,
        session_id: &SessionId,
    ) -> Result<Experiment, DomainError> {
        let experiment_id = ExperimentId::parse(id)?;

        match self
            .repository
            .get_for_session(&experiment_id, session_id)
            .await?
        {
            Some(experiment) => {
                debug!(experiment_id = %experiment_id, "Experiment fetched");
                Ok(experiment)
            }
            None => {
                warn!(
                    experiment_id = %experiment_id,
                    session_id = %session_id,
                    "Experiment not found"
                );
                Err(DomainError::not_found("Experiment not found"))
            }
        }
    }

    /// Recent experiments of the session, newest first
    pub async fn history(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<Experiment>, DomainError> {
        let limit = limit
            .unwrap_or(self.history_limit)
            .clamp(1, MAX_HISTORY_LIMIT);

        let experiments = self.repository.list_for_session(session_id, limit).await?;
        debug!(session_id = %session_id, count = experiments.len(), "History fetched");

        Ok(experiments)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
