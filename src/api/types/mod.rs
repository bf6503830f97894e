//! HTTP payload types and extractors

pub mod envelope;
pub mod error;
pub mod experiment;
pub mod json;
pub mod session;

pub use envelope::ApiResponse;
pub use error::{ApiError, ApiErrorResponse};
pub use experiment::{CreateExperimentRequest, ExperimentDto, HistoryQuery, ResponseDto};
pub use json::Json;
pub use session::{SessionCreated, SessionStats, SessionValidation};
