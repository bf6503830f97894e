//! Session payloads

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Session;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionValidation {
    pub session_id: String,
    pub valid: bool,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub active_sessions: usize,
}

impl From<&Session> for SessionCreated {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            created_at: session.created_at(),
        }
    }
}

impl From<&Session> for SessionValidation {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            valid: true,
            created_at: session.created_at(),
            last_accessed_at: session.last_accessed_at(),
        }
    }
}
