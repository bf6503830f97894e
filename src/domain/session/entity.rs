//! Anonymous session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant};

use crate::domain::DomainError;

/// Parse the canonical hyphenated form of a random (v4, RFC 4122) UUID
pub(crate) fn parse_v4(value: &str) -> Option<Uuid> {
    let value = value.trim();
    if value.len() != 36 {
        return None;
    }

    Uuid::parse_str(value)
        .ok()
        .filter(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
}

/// Session identifier, always a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session id, rejecting anything that is not a hyphenated v4 UUID
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        parse_v4(value)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id("Invalid session ID format"))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A browser session that owns experiments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    last_accessed_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();

        Self {
            id,
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    /// Mark the session as used now
    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }
}
