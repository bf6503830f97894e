//! Domain layer - Core business logic and entities

pub mod error;
pub mod experiment;
pub mod generation;
pub mod llm;
pub mod metrics;
pub mod parameters;
pub mod session;

pub use error::DomainError;
pub use experiment::{
    assemble, Experiment, ExperimentId, ExperimentRepository, ResponseId, ResponseRecord,
};
pub use generation::GeneratedResponse;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use metrics::{DimensionWeights, QualityMetrics, QualityScorer};
pub use parameters::{ParameterRange, ParameterSampler, ParameterSet, BATCH_SIZE};
pub use session::{Session, SessionId, SessionRepository};
