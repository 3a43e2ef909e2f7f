use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::auth::credentials::PasswordCredentials;
use crate::auth::endpoint::exchange;
use crate::auth::error::AuthError;
use crate::auth::store::TokenStore;
use crate::auth::strategy::AuthStrategy;
use crate::auth::token::Token;

use super::DEFAULT_BASE_URL;

const TOKEN_PATH: &str = "/oauth/token";

/// Refresh is cheap, so the token may run closer to real expiry.
pub const EXPIRY_BUFFER_SECS: i64 = 20;

/// Capabilities requested on every acquisition and refresh, in order.
pub const SCOPES: [&str; 7] = [
    "structures.edit",
    "structures.view",
    "pucks.view",
    "pucks.edit",
    "vents.view",
    "vents.edit",
    "users.view",
];

/// OAuth 2.0 resource-owner password credentials grant.
///
/// Renewal tries the refresh token first and falls back to a full
/// username/password acquisition when the refresh fails for any reason.
#[derive(Debug)]
pub struct PasswordGrantStrategy {
    client: reqwest::Client,
    credentials: PasswordCredentials,
    token_url: String,
    scope: String,
    store: TokenStore,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    username: &'a str,
    password: &'a str,
    grant_type: &'static str,
    scope: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'static str,
    scope: &'a str,
}

impl PasswordGrantStrategy {
    pub fn new(credentials: PasswordCredentials) -> Self {
        warn!("Using deprecated OAuth 2.0 Resource Owner Password Credentials flow");
        warn!("This grant is removed in OAuth 2.1; ask Flair support about client credentials");
        Self {
            client: reqwest::Client::new(),
            credentials,
            token_url: format!("{DEFAULT_BASE_URL}{TOKEN_PATH}"),
            scope: SCOPES.join(" "),
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

    /// Space-joined scope string sent with every grant.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Exchange a refresh token for a new token and install it.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let body = RefreshGrant {
            client_id: &self.credentials.client.client_id,
            client_secret: &self.credentials.client.client_secret,
            refresh_token,
            grant_type: "refresh_token",
            scope: &self.scope,
        };
        let issued_at = Utc::now();
        let response = exchange(&self.client, &self.token_url, &body).await?;
        let token = self.install(Token::issue(
            response,
            issued_at,
            Duration::seconds(EXPIRY_BUFFER_SECS),
        )?);
        debug!(expires_at = %token.expires_at, "Refreshed access token");
        Ok(token)
    }

    fn install(&self, token: Token) -> Token {
        self.store.replace(token.clone());
        token
    }
}

#[async_trait]
impl AuthStrategy for PasswordGrantStrategy {
    fn identifier(&self) -> &'static str {
        "password"
    }

    fn store(&self) -> &TokenStore {
        &self.store
    }

    async fn acquire_token(&self) -> Result<Token, AuthError> {
        let body = PasswordGrant {
            client_id: &self.credentials.client.client_id,
            client_secret: &self.credentials.client.client_secret,
            username: &self.credentials.username,
            password: &self.credentials.password,
            grant_type: "password",
            scope: &self.scope,
        };
        let issued_at = Utc::now();
        let response = exchange(&self.client, &self.token_url, &body)
            .await
            .map_err(|err| {
                error!(strategy = "password", error = %err, "Failed to obtain access token");
                err
            })?;
        let token = self.install(Token::issue(
            response,
            issued_at,
            Duration::seconds(EXPIRY_BUFFER_SECS),
        )?);
        info!(expires_at = %token.expires_at, "Obtained access token");
        Ok(token)
    }

    async fn valid_token(&self) -> Result<Token, AuthError> {
        if let Some(token) = self.store.valid_at(Utc::now()) {
            return Ok(token);
        }
        let _renewal = self.store.renewal().await;
        if let Some(token) = self.store.valid_at(Utc::now()) {
            return Ok(token);
        }

        let refresh = self.store.current().and_then(|token| token.refresh_token);
        if let Some(refresh) = refresh {
            match self.refresh_token(&refresh).await {
                Ok(token) => return Ok(token),
                Err(error) => {
                    warn!(%error, "Token refresh failed, obtaining new token");
                }
            }
        }
        self.acquire_token().await
    }
}
