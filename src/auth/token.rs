use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// Token type assumed when the endpoint omits one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Token endpoint response body, shared by both grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// An issued bearer token.
///
/// Tokens are never mutated; a refresh produces a new value that replaces
/// the old one wholesale.
///
/// # Example
/// ```
/// use chrono::{DateTime, Duration};
/// use flair_client::auth::{Token, TokenResponse};
///
/// let response = TokenResponse {
///     access_token: "access".to_string(),
///     token_type: None,
///     expires_in: 3600,
///     refresh_token: None,
///     scope: None,
/// };
/// let issued_at = DateTime::from_timestamp_millis(0).unwrap();
/// let token = Token::issue(response, issued_at, Duration::seconds(60)).unwrap();
/// assert_eq!(token.expires_at.timestamp_millis(), 3_540_000);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
}

impl Token {
    /// Build a token from an endpoint response.
    ///
    /// `expires_at` is `issued_at + expires_in - buffer`, so the token goes
    /// stale strictly before the server invalidates it. A lifetime that
    /// overflows the calendar is rejected as an invalid response.
    pub fn issue(
        response: TokenResponse,
        issued_at: DateTime<Utc>,
        buffer: Duration,
    ) -> Result<Self, AuthError> {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .and_then(|expiry| expiry.checked_sub_signed(buffer))
            .ok_or_else(|| {
                AuthError::InvalidResponse(format!(
                    "expires_in out of range: {}",
                    response.expires_in
                ))
            })?;
        Ok(Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            token_type: response
                .token_type
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .finish()
    }
}
