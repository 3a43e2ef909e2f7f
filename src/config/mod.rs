//! Configuration (layered: explicit file or environment).

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use crate::auth::providers::DEFAULT_BASE_URL;
use crate::auth::{
    ClientCredentials, ClientCredentialsStrategy, GrantStrategy, PasswordCredentials,
    PasswordGrantStrategy,
};
use crate::client::{FlairClient, RequestPipeline};
use crate::error::{FlairError, Result};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Which OAuth grant to authenticate with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthType {
    ClientCredentials,
    Password,
    /// Username/password login as done by the older client; uses the
    /// password grant.
    #[default]
    Legacy,
}

impl AuthType {
    fn needs_user_credentials(self) -> bool {
        !matches!(self, Self::ClientCredentials)
    }
}

/// Client configuration.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlairConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub auth_type: AuthType,
    pub base_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

impl fmt::Debug for FlairConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlairConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| ".."))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .field("auth_type", &self.auth_type)
            .field("base_url", &self.base_url)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .finish()
    }
}

impl FlairConfig {
    /// Load from `FLAIR_*` environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup using the `FLAIR_*` variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let auth_type = match read("FLAIR_AUTH_TYPE") {
            Some(raw) => raw.trim().parse::<AuthType>().map_err(|_| {
                FlairError::Configuration(format!("Unknown FLAIR_AUTH_TYPE: {raw}"))
            })?,
            None => AuthType::default(),
        };
        let poll_interval_secs = match read("FLAIR_POLL_INTERVAL") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                FlairError::Configuration(format!("Invalid FLAIR_POLL_INTERVAL: {raw}"))
            })?),
            None => None,
        };

        Ok(Self {
            client_id: read("FLAIR_CLIENT_ID"),
            client_secret: read("FLAIR_CLIENT_SECRET"),
            username: read("FLAIR_USERNAME"),
            password: read("FLAIR_PASSWORD"),
            auth_type,
            base_url: read("FLAIR_BASE_URL"),
            poll_interval_secs,
        })
    }

    /// Load a TOML config file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| {
            FlairError::Configuration(format!("Invalid config at {}: {err}", path.display()))
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Interval the device poller should use between reads.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// Report every missing field for the selected grant at once.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if is_blank(&self.client_id) {
            missing.push("client_id");
        }
        if is_blank(&self.client_secret) {
            missing.push("client_secret");
        }
        if self.auth_type.needs_user_credentials() {
            if is_blank(&self.username) {
                missing.push("username");
            }
            if is_blank(&self.password) {
                missing.push("password");
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FlairError::Configuration(format!(
                "Missing {} for {} authentication",
                missing.join(", "),
                self.auth_type
            )))
        }
    }

    /// Select the grant strategy once, from the configured auth type.
    pub fn build_strategy(&self) -> Result<Arc<GrantStrategy>> {
        self.validate()?;
        let client = ClientCredentials::new(
            self.client_id.clone().unwrap_or_default(),
            self.client_secret.clone().unwrap_or_default(),
        );
        let strategy: GrantStrategy = match self.auth_type {
            AuthType::ClientCredentials => ClientCredentialsStrategy::new(client)
                .with_base_url(self.base_url())
                .into(),
            AuthType::Password | AuthType::Legacy => {
                if self.auth_type == AuthType::Legacy {
                    info!("No auth type configured, using the OAuth 2.0 password grant");
                }
                PasswordGrantStrategy::new(PasswordCredentials::new(
                    client,
                    self.username.clone().unwrap_or_default(),
                    self.password.clone().unwrap_or_default(),
                ))
                .with_base_url(self.base_url())
                .into()
            }
        };
        Ok(Arc::new(strategy))
    }

    /// Wire strategy, pipeline, and client together.
    pub fn build_client(&self) -> Result<FlairClient> {
        let strategy = self.build_strategy()?;
        let pipeline = RequestPipeline::new(strategy)?.with_base_url(self.base_url());
        Ok(FlairClient::from_pipeline(pipeline))
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
