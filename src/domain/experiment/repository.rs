//! Experiment repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Experiment, ExperimentId};
use crate::domain::DomainError;
use crate::domain::session::SessionId;

/// Repository trait for experiments.
///
/// `create` stores the experiment and all of its responses as one unit:
/// either everything is visible afterwards or nothing is.
#[async_trait]
pub trait ExperimentRepository: Send + Sync + Debug {
    /// Store a fully assembled experiment
    async fn create(&self, experiment: Experiment) -> Result<Experiment, DomainError>;

    /// Get an experiment owned by the given session
    async fn get_for_session(
        &self,
        id: &ExperimentId,
        session_id: &SessionId,
    ) -> Result<Option<Experiment>, DomainError>;

    /// Most recent experiments of a session, newest first
    async fn list_for_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<Experiment>, DomainError>;

    /// Total number of stored experiments
    async fn count(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub mod mock {
    //! Mock implementation for testing

    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock experiment repository for testing
    #[derive(Debug, Default)]
    pub struct MockExperimentRepository {
        experiments: RwLock<HashMap<ExperimentId, Experiment>>,
        should_fail: RwLock<bool>,
    }

    impl MockExperimentRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self) -> Self {
            *self.should_fail.write().unwrap() = true;
            self
        }

        pub fn stored_count(&self) -> usize {
            self.experiments.read().unwrap().len()
        }

        fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().unwrap() {
                Err(DomainError::storage("Mock error"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ExperimentRepository for MockExperimentRepository {
        async fn create(&self, experiment: Experiment) -> Result<Experiment, DomainError> {
            self.check_should_fail()?;
            self.experiments
                .write()
                .unwrap()
                .insert(*experiment.id(), experiment.clone());
            Ok(experiment)
        }

        async fn get_for_session(
            &self,
            id: &ExperimentId,
            session_id: &SessionId,
        ) -> Result<Option<Experiment>, DomainError> {
            self.check_should_fail()?;
            let experiments = self.experiments.read().unwrap();
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
            self.check_should_fail()?;
            let experiments = self.experiments.read().unwrap();

            let mut results: Vec<_> = experiments
                .values()
                .filter(|e| e.belongs_to(session_id))
                .cloned()
                .collect();

            results.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            results.truncate(limit);
            Ok(results)
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.check_should_fail()?;
            Ok(self.experiments.read().unwrap().len())
        }
    }
}
