//! Convenience re-exports for common use.

pub use crate::auth::{
    AuthError, AuthStrategy, ClientCredentials, ClientCredentialsStrategy, GrantStrategy,
    PasswordCredentials, PasswordGrantStrategy, Token,
};
pub use crate::client::{ApiRequest, FlairClient, RequestPipeline};
pub use crate::config::{AuthType, FlairConfig};
pub use crate::error::{FlairError, Result};
pub use crate::types::{Resource, ResourceKind, StructureHeatCoolMode, StructureMode};
