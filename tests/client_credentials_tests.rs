mod flair_support;

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use flair_client::auth::{AuthError, AuthStrategy, ClientCredentials, ClientCredentialsStrategy};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flair_support::{client_credentials, seed_expired, token_body, CLIENT_ID, CLIENT_SECRET};

#[tokio::test]
async fn acquires_token_with_client_credentials_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_json(json!({
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
            "grant_type": "client_credentials"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("cc-1", None)))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let before = Utc::now();
    let token = strategy.acquire_token().await.expect("acquire");
    let after = Utc::now();

    assert_eq!(token.access_token, "cc-1");
    assert_eq!(token.token_type, "Bearer");
    assert!(token.refresh_token.is_none());
    assert!(token.expires_at >= before + Duration::seconds(3540));
    assert!(token.expires_at <= after + Duration::seconds(3540));
    assert_eq!(strategy.store().current(), Some(token));
}

#[tokio::test]
async fn valid_token_is_served_from_the_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("cc-1", None)))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let first = strategy.valid_token().await.expect("first");
    let second = strategy.valid_token().await.expect("second");

    assert_eq!(first.access_token, "cc-1");
    assert_eq!(first, second);
}

#[tokio::test]
async fn expired_token_triggers_exactly_one_full_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "grant_type": "refresh_token" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_partial_json(json!({ "grant_type": "client_credentials" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("cc-2", None)))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    seed_expired(&*strategy, "cc-old", Some("never-used"));

    let token = strategy.valid_token().await.expect("renewed");
    assert_eq!(token.access_token, "cc-2");
}

#[tokio::test]
async fn refresh_token_in_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body("cc-1", Some("unexpected"))),
        )
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let token = strategy.valid_token().await.expect("token");
    assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn rejected_client_maps_to_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Client authentication failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let err = strategy.valid_token().await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials(ref d) if d == "Client authentication failed"));
    assert!(strategy.store().current().is_none());
}

#[tokio::test]
async fn unsupported_grant_is_reported_distinctly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "unsupported_grant_type"
        })))
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let err = strategy.acquire_token().await.unwrap_err();
    assert!(matches!(err, AuthError::UnsupportedGrant(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let strategy =
        ClientCredentialsStrategy::new(ClientCredentials::new(CLIENT_ID, CLIENT_SECRET))
            .with_base_url("http://127.0.0.1:1");
    let err = strategy.valid_token().await.unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

#[tokio::test]
async fn malformed_token_response_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "x" })))
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let err = strategy.acquire_token().await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidResponse(_)));
}

#[tokio::test]
async fn concurrent_callers_share_one_acquisition() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("cc-shared", None))
                .set_delay(StdDuration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let calls = (0..8).map(|_| strategy.valid_token());
    let tokens = futures::future::join_all(calls).await;

    for token in tokens {
        assert_eq!(token.expect("token").access_token, "cc-shared");
    }
}

#[tokio::test]
async fn validate_credentials_reports_failure_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_client" })))
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    assert!(!strategy.validate_credentials().await);
    assert_eq!(strategy.identifier(), "client_credentials");
}

#[tokio::test]
async fn out_of_range_lifetime_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a",
            "token_type": "Bearer",
            "expires_in": 100_000_000_000_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = client_credentials(&server);
    let err = strategy.valid_token().await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidResponse(_)));
    assert!(strategy.store().current().is_none());
}
