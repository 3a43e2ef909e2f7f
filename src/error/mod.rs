//! Error types for the Flair client.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum FlairError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FlairError {
    /// Create an API error from a response status and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authorization,
                404 => ErrorCategory::NotFound,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            _ => ErrorCategory::Unknown,
        }
    }

    /// Whether the resource API rejected the bearer token.
    pub fn is_authorization_rejected(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Whether this error is potentially retryable by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication | ErrorCategory::Authorization => {
                RecoverySuggestion::CheckCredentials
            }
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::NotFound => RecoverySuggestion::CheckResourceId,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FlairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_401_is_authorization_rejected() {
        let err = FlairError::api(401, "expired");
        assert!(err.is_authorization_rejected());
        assert_eq!(err.category(), ErrorCategory::Authorization);
        assert!(!err.is_retryable());
    }

    #[test]
    fn acquisition_failure_is_not_authorization_rejected() {
        let err = FlairError::Authentication("Authentication failed".into());
        assert!(!err.is_authorization_rejected());
        assert_eq!(
            err.recovery_suggestion(),
            RecoverySuggestion::CheckCredentials
        );
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(FlairError::api(503, "down").is_retryable());
        assert!(!FlairError::api(422, "bad").is_retryable());
    }
}
