//! Flair API client
//!
//! Authenticates requests to the Flair smart vent API with OAuth2, keeps the
//! bearer token fresh, and retries a request once when the API rejects its
//! token.
//!
//! # Quick Start
//!
//! ```no_run
//! use flair_client::prelude::*;
//!
//! # async fn example() -> flair_client::error::Result<()> {
//! let config = FlairConfig::from_env()?;
//! let client = config.build_client()?;
//! let structure = client.primary_structure().await?;
//! println!("{:?}", structure.name());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
