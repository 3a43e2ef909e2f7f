#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use flair_client::auth::{
    AuthStrategy, ClientCredentials, ClientCredentialsStrategy, PasswordCredentials,
    PasswordGrantStrategy, Token,
};
use flair_client::client::FlairClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const USERNAME: &str = "owner@example.com";
pub const PASSWORD: &str = "hunter2";
pub const SCOPE: &str =
    "structures.edit structures.view pucks.view pucks.edit vents.view vents.edit users.view";

pub fn client_credentials(server: &MockServer) -> Arc<ClientCredentialsStrategy> {
    Arc::new(
        ClientCredentialsStrategy::new(ClientCredentials::new(CLIENT_ID, CLIENT_SECRET))
            .with_base_url(&server.uri()),
    )
}

pub fn password_grant(server: &MockServer) -> Arc<PasswordGrantStrategy> {
    Arc::new(
        PasswordGrantStrategy::new(PasswordCredentials::new(
            ClientCredentials::new(CLIENT_ID, CLIENT_SECRET),
            USERNAME,
            PASSWORD,
        ))
        .with_base_url(&server.uri()),
    )
}

pub fn flair_client(strategy: Arc<dyn AuthStrategy>, server: &MockServer) -> FlairClient {
    FlairClient::new(strategy)
        .expect("build client")
        .with_base_url(&server.uri())
}

pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
    });
    if let Some(refresh) = refresh_token {
        body["refresh_token"] = json!(refresh);
    }
    body
}

/// Install a token that is still within its validity window.
pub fn seed_valid(strategy: &dyn AuthStrategy, access_token: &str, refresh_token: Option<&str>) {
    strategy.store().replace(Token {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_at: Utc::now() + Duration::hours(1),
        token_type: "Bearer".to_string(),
    });
}

/// Install a token whose expiry has already passed.
pub fn seed_expired(strategy: &dyn AuthStrategy, access_token: &str, refresh_token: Option<&str>) {
    strategy.store().replace(Token {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_at: Utc::now() - Duration::seconds(1),
        token_type: "Bearer".to_string(),
    });
}

pub fn resource(id: &str, kind: &str, attributes: Value) -> Value {
    json!({ "id": id, "type": kind, "attributes": attributes })
}
