use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::auth::credentials::ClientCredentials;
use crate::auth::endpoint::exchange;
use crate::auth::error::AuthError;
use crate::auth::store::TokenStore;
use crate::auth::strategy::AuthStrategy;
use crate::auth::token::Token;

use super::DEFAULT_BASE_URL;

const TOKEN_PATH: &str = "/oauth2/token";

/// No refresh path exists, so re-authenticate well ahead of real expiry.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// OAuth 2.0 client-credentials grant.
///
/// The endpoint never issues refresh tokens; an invalid token is always
/// replaced by a full re-authentication.
///
/// # Example
/// ```no_run
/// use flair_client::auth::providers::client_credentials::ClientCredentialsStrategy;
/// use flair_client::auth::{AuthStrategy, ClientCredentials};
///
/// # async fn example() -> Result<(), flair_client::auth::AuthError> {
/// let strategy = ClientCredentialsStrategy::new(ClientCredentials::new("id", "secret"));
/// let token = strategy.valid_token().await?;
/// println!("expires at {}", token.expires_at);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientCredentialsStrategy {
    client: reqwest::Client,
    credentials: ClientCredentials,
    token_url: String,
    store: TokenStore,
}

#[derive(Serialize)]
struct ClientCredentialsGrant<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
}

impl ClientCredentialsStrategy {
    pub fn new(credentials: ClientCredentials) -> Self {
        info!("Using OAuth 2.0 Client Credentials flow for authentication");
        Self {
            client: reqwest::Client::new(),
            credentials,
            token_url: format!("{DEFAULT_BASE_URL}{TOKEN_PATH}"),
            store: TokenStore::new(),
        }
    }

    /// Point the strategy at a different API host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.token_url = format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/'));
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

#[async_trait]
impl AuthStrategy for ClientCredentialsStrategy {
    fn identifier(&self) -> &'static str {
        "client_credentials"
    }

    fn store(&self) -> &TokenStore {
        &self.store
    }

    async fn acquire_token(&self) -> Result<Token, AuthError> {
        let body = ClientCredentialsGrant {
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            grant_type: "client_credentials",
        };
        let issued_at = Utc::now();
        let mut response = match exchange(&self.client, &self.token_url, &body).await {
            Ok(response) => response,
            Err(err) => {
                if let AuthError::UnsupportedGrant(_) = &err {
                    error!("Client credentials grant type not supported by the Flair API; verify the OAuth 2.0 configuration with Flair support");
                }
                error!(strategy = self.identifier(), error = %err, "Failed to obtain access token");
                return Err(err);
            }
        };
        // Refresh tokens are ignored even if the endpoint sends one.
        response.refresh_token = None;
        let token = Token::issue(
            response,
            issued_at,
            Duration::seconds(EXPIRY_BUFFER_SECS),
        )?;
        self.store.replace(token.clone());
        debug!(expires_at = %token.expires_at, "Obtained access token");
        Ok(token)
    }

    async fn valid_token(&self) -> Result<Token, AuthError> {
        if let Some(token) = self.store.valid_at(Utc::now()) {
            return Ok(token);
        }
        let _renewal = self.store.renewal().await;
        // Another caller may have renewed while we waited.
        if let Some(token) = self.store.valid_at(Utc::now()) {
            return Ok(token);
        }
        self.acquire_token().await
    }
}
