use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};

use super::token::Token;

/// Holds the single current token of one strategy instance.
///
/// Pure state: nothing here touches the network. The renewal gate lets a
/// strategy serialize refresh/acquisition so concurrent callers that all see
/// a stale token share one round trip to the token endpoint.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<Token>>,
    renewal: Mutex<()>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The held token, valid or not.
    pub fn current(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True iff a token is held and `now < expires_at`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.valid_at(now).is_some()
    }

    /// The held token if it is still valid at `now`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .cloned()
    }

    /// Install a new token, discarding the old one.
    pub fn replace(&self, token: Token) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the held token.
    pub fn invalidate(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Drop the held token only if it is still the one that was rejected.
    ///
    /// Returns `true` when the token was cleared.
    pub fn invalidate_if_current(&self, access_token: &str) -> bool {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) if token.access_token == access_token => {
                *guard = None;
                true
            }
            _ => false,
        }
    }

    /// Wait for exclusive right to renew the token.
    pub async fn renewal(&self) -> MutexGuard<'_, ()> {
        self.renewal.lock().await
    }
}
