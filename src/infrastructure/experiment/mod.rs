//! Experiment persistence

mod in_memory_repository;
mod postgres_repository;

pub use in_memory_repository::InMemoryExperimentRepository;
pub use postgres_repository::PostgresExperimentRepository;
