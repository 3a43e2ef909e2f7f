use thiserror::Error;

use crate::error::FlairError;

/// Failures while obtaining or refreshing a token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Unsupported grant type: {0}")]
    UnsupportedGrant(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

// Callers only need to know the client is unusable, not why.
impl From<AuthError> for FlairError {
    fn from(error: AuthError) -> Self {
        FlairError::Authentication(format!("Authentication failed: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_collapses_to_authentication_failed() {
        let errors = [
            AuthError::InvalidCredentials("bad secret".into()),
            AuthError::UnsupportedGrant("password".into()),
            AuthError::Network("connection refused".into()),
            AuthError::InvalidResponse("missing access_token".into()),
        ];
        for error in errors {
            let mapped = FlairError::from(error);
            assert!(matches!(&mapped, FlairError::Authentication(msg) if msg.starts_with("Authentication failed")));
        }
    }
}
