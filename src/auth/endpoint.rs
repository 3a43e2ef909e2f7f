//! Token endpoint exchange shared by both grants.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::TokenResponse;

/// POST a JSON grant body to a token endpoint and parse the token response.
pub(crate) async fn exchange<B>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<TokenResponse, AuthError>
where
    B: Serialize + ?Sized,
{
    let resp = client
        .post(url)
        .header(ACCEPT, "application/json")
        .json(body)
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(classify_failure(status, &text));
    }
    let payload: TokenResponse = serde_json::from_str(&text)?;
    if payload.access_token.is_empty() {
        return Err(AuthError::InvalidResponse(
            "Token response has an empty access_token".to_string(),
        ));
    }
    Ok(payload)
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

fn classify_failure(status: StatusCode, body: &str) -> AuthError {
    let parsed = serde_json::from_str::<TokenErrorBody>(body).ok();
    let code = parsed.as_ref().and_then(|b| b.error.clone());
    let detail = parsed
        .and_then(|b| b.error_description.or(b.error))
        .unwrap_or_else(|| format!("status {status}"));

    match code.as_deref() {
        Some("unsupported_grant_type") | Some("unauthorized_client") => {
            return AuthError::UnsupportedGrant(detail);
        }
        _ => {}
    }
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AuthError::InvalidCredentials(detail)
        }
        _ => AuthError::InvalidResponse(format!(
            "Token endpoint returned status {status}"
        )),
    }
}
