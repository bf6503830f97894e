//! Prompt validation

use crate::domain::DomainError;

pub const MAX_PROMPT_CHARS: usize = 5000;

/// Returns the trimmed prompt if it is non-empty and within the size limit
pub fn validate_prompt(prompt: &str) -> Result<&str, DomainError> {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return Err(DomainError::validation("Prompt is required"));
    }

    if trimmed.chars().count() > MAX_PROMPT_CHARS {
        return Err(DomainError::validation(format!(
            "Prompt must be at most {} characters",
            MAX_PROMPT_CHARS
        )));
    }

    Ok(trimmed)
}
