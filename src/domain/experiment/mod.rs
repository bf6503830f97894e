//! Experiments: a prompt, four sampled parameter sets and their scored responses

mod assembler;
mod entity;
mod repository;
mod validation;

pub use assembler::assemble;
pub use entity::{Experiment, ExperimentId, ResponseId, ResponseRecord};
pub use repository::ExperimentRepository;
pub use validation::{validate_prompt, MAX_PROMPT_CHARS};

#[cfg(test)]
pub use repository::mock::MockExperimentRepository;
