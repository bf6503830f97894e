//! Generation parameter ranges and the sampler that turns them into
//! concrete parameter sets

mod range;
mod sampler;
mod set;

pub use range::{
    ParameterRange, MAX_TOKENS_DOMAIN, TEMPERATURE_DOMAIN, TOP_P_DOMAIN,
};
pub use sampler::{ParameterSampler, BATCH_SIZE, DEFAULT_MAX_TEMPERATURE};
pub use set::ParameterSet;
