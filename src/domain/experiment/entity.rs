//! Experiment entity: one prompt run against four parameter sets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::generation::GeneratedResponse;
use crate::domain::metrics::QualityMetrics;
use crate::domain::parameters::ParameterSet;
use crate::domain::session::{parse_v4, SessionId};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentId(Uuid);

impl ExperimentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        parse_v4(value)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id("Invalid experiment ID format"))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ExperimentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one response within an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(Uuid);

impl ResponseId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ResponseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ResponseRecord
// ============================================================================

/// A generated response together with the parameters that produced it
/// and its quality scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: ResponseId,
    pub parameters: ParameterSet,
    pub generated: GeneratedResponse,
    pub metrics: QualityMetrics,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Experiment
// ============================================================================

/// A prompt with its scored responses, persisted as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    id: ExperimentId,
    session_id: SessionId,
    prompt: String,
    responses: Vec<ResponseRecord>,
    created_at: DateTime<Utc>,
}

impl Experiment {
    /// Rebuild an experiment from stored parts
    pub fn restore(
        id: ExperimentId,
        session_id: SessionId,
        prompt: impl Into<String>,
        responses: Vec<ResponseRecord>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            prompt: prompt.into(),
            responses,
            created_at,
        }
    }

    pub fn id(&self) -> &ExperimentId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn belongs_to(&self, session_id: &SessionId) -> bool {
        &self.session_id == session_id
    }

    /// Response with the highest overall score, first one wins ties
    pub fn best_response(&self) -> Option<&ResponseRecord> {
        self.responses.iter().reduce(|best, candidate| {
            if candidate.metrics.overall > best.metrics.overall {
                candidate
            } else {
                best
            }
        })
    }
}
