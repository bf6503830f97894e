//! Infrastructure layer - provider client, persistence, services and telemetry

pub mod experiment;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod rate_limit;
pub mod services;
pub mod session;
