//! In-memory implementation of the session repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{DomainError, Session, SessionId, SessionRepository};

/// In-memory session repository implementation
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        sessions.insert(*session.id(), session.clone());
        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(sessions.get(id).cloned())
    }

    async fn touch(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        Ok(sessions.get_mut(id).map(|session| {
            session.touch();
            session.clone()
        }))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_count() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create(Session::new(SessionId::generate())).await.unwrap();

        assert_eq!(repo.get(session.id()).await.unwrap(), Some(session.clone()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_touch_unknown_session() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.touch(&SessionId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_updates_stored_session() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create(Session::new(SessionId::generate())).await.unwrap();

        let touched = repo.touch(session.id()).await.unwrap().unwrap();
        let stored = repo.get(session.id()).await.unwrap().unwrap();

        assert_eq!(touched.last_accessed_at(), stored.last_accessed_at());
        assert!(stored.last_accessed_at() >= session.last_accessed_at());
    }
}
