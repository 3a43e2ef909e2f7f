//! OAuth2 token acquisition, renewal, and bookkeeping.

pub mod credentials;
pub(crate) mod endpoint;
pub mod error;
pub mod providers;
pub mod store;
pub mod strategy;
pub mod token;

pub use credentials::{ClientCredentials, PasswordCredentials};
pub use error::AuthError;
pub use providers::client_credentials::ClientCredentialsStrategy;
pub use providers::password_grant::PasswordGrantStrategy;
pub use store::TokenStore;
pub use strategy::{AuthStrategy, GrantStrategy};
pub use token::{Token, TokenResponse};
