//! Session repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Session, SessionId};
use crate::domain::DomainError;

/// Repository trait for session storage
#[async_trait]
pub trait SessionRepository: Send + Sync + Debug {
    /// Store a new session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Get a session by id without touching it
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Update the last access time and return the session
    async fn touch(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Number of sessions currently known
    async fn count(&self) -> Result<usize, DomainError>;
}
