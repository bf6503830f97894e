//! In-memory implementation of the experiment repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{DomainError, Experiment, ExperimentId, ExperimentRepository, SessionId};

/// In-memory experiment repository implementation.
///
/// An experiment and its responses are one value in the map, so an insert
/// is all-or-nothing.
#[derive(Debug, Default)]
pub struct InMemoryExperimentRepository {
    experiments: RwLock<HashMap<ExperimentId, Experiment>>,
}

impl InMemoryExperimentRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExperimentRepository for InMemoryExperimentRepository {
    async fn create(&self, experiment: Experiment) -> Result<Experiment, DomainError> {
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if experiments.contains_key(experiment.id()) {
            return Err(DomainError::storage(format!(
                "Experiment '{}' already exists",
                experiment.id()
            )));
        }

        experiments.insert(*experiment.id(), experiment.clone());
        Ok(experiment)
    }

    async fn get_for_session(
        &self,
        id: &ExperimentId,
        session_id: &SessionId,
    ) -> Result<Option<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(experiments
            .get(id)
            .filter(|e| e.belongs_to(session_id))
            .cloned())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut results: Vec<_> = experiments
            .values()
            .filter(|e| e.belongs_to(session_id))
            .cloned()
            .collect();

        // Newest first
        results.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(experiments.len())
    }
}
