//! Session service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DomainError, Session, SessionId, SessionRepository};

/// Service issuing and validating anonymous sessions
#[derive(Debug)]
pub struct SessionService<R: SessionRepository> {
    repository: Arc<R>,
}

impl<R: SessionRepository> SessionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Start a new session
    pub async fn create(&self) -> Result<Session, DomainError> {
        let session = self.repository.create(Session::new(SessionId::generate())).await?;
        info!(session_id = %session.id(), "Session created");
        Ok(session)
    }

    /// Look up a session and mark it as used
    pub async fn get(&self, id: &str) -> Result<Session, DomainError> {
        let session_id = SessionId::parse(id)?;

        let session = self
            .repository
            .touch(&session_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Session not found"))?;

        debug!(session_id = %session_id, "Session validated");
        Ok(session)
    }

    /// Whether the string is a well-formed session id
    pub fn is_valid_id(&self, id: &str) -> bool {
        SessionId::parse(id).is_ok()
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
