//! Grant-specific strategies for the Flair token endpoints.

pub mod client_credentials;
pub mod password_grant;

/// Production API host; both token endpoints live under it.
pub const DEFAULT_BASE_URL: &str = "https://api.flair.co";
