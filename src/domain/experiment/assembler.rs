//! Zips sampled parameters, generated responses and their scores into an experiment

use chrono::Utc;

use super::entity::{Experiment, ExperimentId, ResponseId, ResponseRecord};
use crate::domain::DomainError;
use crate::domain::generation::GeneratedResponse;
use crate::domain::metrics::QualityMetrics;
use crate::domain::parameters::ParameterSet;
use crate::domain::session::SessionId;

/// Builds the experiment from parallel slices.
///
/// The three inputs must have the same length; a mismatch is a bug in the
/// caller and is reported as an internal error.
pub fn assemble(
    prompt: &str,
    session_id: SessionId,
    sets: &[ParameterSet],
    responses: Vec<GeneratedResponse>,
    metrics: &[QualityMetrics],
) -> Result<Experiment, DomainError> {
    if sets.len() != responses.len() || sets.len() != metrics.len() {
        return Err(DomainError::internal(format!(
            "Cannot assemble experiment from {} parameter sets, {} responses and {} metrics",
            sets.len(),
            responses.len(),
            metrics.len()
        )));
    }

    let now = Utc::now();

    let records = sets
        .iter()
        .zip(responses)
        .zip(metrics)
        .map(|((parameters, generated), metrics)| ResponseRecord {
            id: ResponseId::generate(),
            parameters: *parameters,
            generated,
            metrics: *metrics,
            created_at: now,
        })
        .collect();

    Ok(Experiment::restore(
        ExperimentId::generate(),
        session_id,
        prompt,
        records,
        now,
    ))
}
