//! Infrastructure services

mod batch_generator;
mod experiment_service;
mod session_service;

pub use batch_generator::BatchGenerator;
pub use experiment_service::{ExperimentService, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
pub use session_service::SessionService;
