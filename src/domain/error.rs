use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Validation { .. }
                | Self::InvalidId { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Experiment 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Experiment 'abc' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("prompt is required");
        assert_eq!(error.to_string(), "Validation error: prompt is required");
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("mistral", "HTTP 500");
        assert_eq!(error.to_string(), "Provider error: mistral - HTTP 500");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::validation("x").is_client_error());
        assert!(DomainError::invalid_id("x").is_client_error());
        assert!(!DomainError::provider("mistral", "x").is_client_error());
        assert!(!DomainError::internal("x").is_client_error());
    }
}
