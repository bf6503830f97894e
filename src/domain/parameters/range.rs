use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Accepted temperature values (inclusive)
pub const TEMPERATURE_DOMAIN: (f64, f64) = (0.0, 2.0);
/// Accepted nucleus-sampling values (inclusive)
pub const TOP_P_DOMAIN: (f64, f64) = (0.0, 1.0);
/// Accepted output length targets (inclusive)
pub const MAX_TOKENS_DOMAIN: (u32, u32) = (100, 1000);

/// User-supplied bounds for temperature and top_p plus a single
/// max-token target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRange {
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub top_p_min: f64,
    pub top_p_max: f64,
    pub max_tokens: u32,
}

impl ParameterRange {
    pub fn new(
        temperature: (f64, f64),
        top_p: (f64, f64),
        max_tokens: u32,
    ) -> Self {
        Self {
            temperature_min: temperature.0,
            temperature_max: temperature.1,
            top_p_min: top_p.0,
            top_p_max: top_p.1,
            max_tokens,
        }
    }

    /// Check domains and min <= max ordering
    pub fn validate(&self) -> Result<(), DomainError> {
        check_number("temperatureMin", self.temperature_min, TEMPERATURE_DOMAIN)?;
        check_number("temperatureMax", self.temperature_max, TEMPERATURE_DOMAIN)?;
        check_number("topPMin", self.top_p_min, TOP_P_DOMAIN)?;
        check_number("topPMax", self.top_p_max, TOP_P_DOMAIN)?;

        let (min_tokens, max_tokens) = MAX_TOKENS_DOMAIN;

        if self.max_tokens < min_tokens || self.max_tokens > max_tokens {
            return Err(DomainError::validation(format!(
                "maxTokens must be between {} and {}",
                min_tokens, max_tokens
            )));
        }

        if self.temperature_min > self.temperature_max {
            return Err(DomainError::validation(
                "temperatureMin must be less than or equal to temperatureMax",
            ));
        }

        if self.top_p_min > self.top_p_max {
            return Err(DomainError::validation(
                "topPMin must be less than or equal to topPMax",
            ));
        }

        Ok(())
    }
}

fn check_number(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!(
            "{} must be a valid number",
            field
        )));
    }

    if value < min || value > max {
        return Err(DomainError::validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }

    Ok(())
}
