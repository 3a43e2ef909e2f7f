//! Token acquisition strategies.

use async_trait::async_trait;

use super::error::AuthError;
use super::providers::client_credentials::ClientCredentialsStrategy;
use super::providers::password_grant::PasswordGrantStrategy;
use super::store::TokenStore;
use super::token::Token;

/// Knows how to obtain, and where supported renew, a bearer token.
///
/// Each instance owns exactly one [`TokenStore`]; tokens are never shared
/// across instances.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Grant name used in diagnostics (`client_credentials`, `password`).
    fn identifier(&self) -> &'static str;

    /// The store holding this strategy's token.
    fn store(&self) -> &TokenStore;

    /// Perform a full authentication and install the resulting token.
    async fn acquire_token(&self) -> Result<Token, AuthError>;

    /// Return the held token if valid, otherwise renew it.
    async fn valid_token(&self) -> Result<Token, AuthError>;

    /// Forget the held token unconditionally.
    fn invalidate(&self) {
        self.store().invalidate();
    }

    /// Forget the held token if it is the one the resource API rejected.
    fn invalidate_rejected(&self, rejected: &Token) -> bool {
        self.store().invalidate_if_current(&rejected.access_token)
    }

    /// Check the configured credentials with a fresh acquisition.
    async fn validate_credentials(&self) -> bool {
        match self.acquire_token().await {
            Ok(_) => true,
            Err(error) => {
                tracing::error!(strategy = self.identifier(), %error, "Invalid credentials");
                false
            }
        }
    }
}

/// The closed set of supported grants, chosen once at configuration time.
#[derive(Debug)]
pub enum GrantStrategy {
    ClientCredentials(ClientCredentialsStrategy),
    PasswordGrant(PasswordGrantStrategy),
}

impl From<ClientCredentialsStrategy> for GrantStrategy {
    fn from(strategy: ClientCredentialsStrategy) -> Self {
        Self::ClientCredentials(strategy)
    }
}

impl From<PasswordGrantStrategy> for GrantStrategy {
    fn from(strategy: PasswordGrantStrategy) -> Self {
        Self::PasswordGrant(strategy)
    }
}

#[async_trait]
impl AuthStrategy for GrantStrategy {
    fn identifier(&self) -> &'static str {
        match self {
            Self::ClientCredentials(s) => s.identifier(),
            Self::PasswordGrant(s) => s.identifier(),
        }
    }

    fn store(&self) -> &TokenStore {
        match self {
            Self::ClientCredentials(s) => s.store(),
            Self::PasswordGrant(s) => s.store(),
        }
    }

    async fn acquire_token(&self) -> Result<Token, AuthError> {
        match self {
            Self::ClientCredentials(s) => s.acquire_token().await,
            Self::PasswordGrant(s) => s.acquire_token().await,
        }
    }

    async fn valid_token(&self) -> Result<Token, AuthError> {
        match self {
            Self::ClientCredentials(s) => s.valid_token().await,
            Self::PasswordGrant(s) => s.valid_token().await,
        }
    }
}
