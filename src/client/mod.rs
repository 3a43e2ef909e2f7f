//! Typed façade over the Flair resource API.

pub mod http;
pub mod pipeline;

pub use pipeline::{ApiRequest, RequestContext, RequestPipeline};

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::auth::AuthStrategy;
use crate::error::{FlairError, Result};
use crate::types::{Document, Resource, ResourceKind, StructureHeatCoolMode, StructureMode};

/// Flair API client.
///
/// Every method is one logical request through the [`RequestPipeline`], so
/// each call gets at most one token-renewal retry.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use flair_client::auth::{ClientCredentials, ClientCredentialsStrategy};
/// use flair_client::client::FlairClient;
///
/// # async fn example() -> flair_client::error::Result<()> {
/// let strategy = ClientCredentialsStrategy::new(ClientCredentials::new("id", "secret"));
/// let client = FlairClient::new(Arc::new(strategy))?;
/// for room in client.rooms().await? {
///     println!("{} {:?}", room.id, room.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FlairClient {
    pipeline: RequestPipeline,
}

impl FlairClient {
    pub fn new(strategy: Arc<dyn AuthStrategy>) -> Result<Self> {
        Ok(Self {
            pipeline: RequestPipeline::new(strategy)?,
        })
    }

    pub fn from_pipeline(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.pipeline = self.pipeline.with_base_url(base_url);
        self
    }

    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    /// Check that the credentials can read the user list.
    pub async fn validate_credentials(&self) -> bool {
        match self.users().await {
            Ok(_) => true,
            Err(error) => {
                debug!(%error, "Credential check failed");
                false
            }
        }
    }

    pub async fn users(&self) -> Result<Vec<Resource>> {
        self.list(ApiRequest::get(ResourceKind::Users.collection_path()))
            .await
    }

    pub async fn pucks(&self) -> Result<Vec<Resource>> {
        self.list(
            ApiRequest::get(ResourceKind::Pucks.collection_path())
                .with_query("expand", "structure,room"),
        )
        .await
    }

    /// Latest sensor reading for one puck.
    pub async fn puck_reading(&self, puck_id: &str) -> Result<Resource> {
        self.one(ApiRequest::get(format!(
            "{}/current-reading",
            ResourceKind::Pucks.item_path(puck_id)
        )))
        .await
    }

    pub async fn vents(&self) -> Result<Vec<Resource>> {
        self.list(
            ApiRequest::get(ResourceKind::Vents.collection_path())
                .with_query("expand", "structure,room"),
        )
        .await
    }

    /// Latest reading for one vent.
    pub async fn vent_reading(&self, vent_id: &str) -> Result<Resource> {
        self.one(ApiRequest::get(format!(
            "{}/current-reading",
            ResourceKind::Vents.item_path(vent_id)
        )))
        .await
    }

    pub async fn set_vent_percent_open(&self, vent_id: &str, percent_open: u8) -> Result<Resource> {
        if percent_open > 100 {
            return Err(FlairError::InvalidArgument(format!(
                "percent open must be 0..=100, got {percent_open}"
            )));
        }
        self.patch(
            ResourceKind::Vents,
            vent_id,
            json!({ "percent-open": percent_open }),
        )
        .await
    }

    pub async fn rooms(&self) -> Result<Vec<Resource>> {
        self.list(
            ApiRequest::get(ResourceKind::Rooms.collection_path())
                .with_query("expand", "structure,pucks"),
        )
        .await
    }

    pub async fn room(&self, room_id: &str) -> Result<Resource> {
        self.one(ApiRequest::get(ResourceKind::Rooms.item_path(room_id)))
            .await
    }

    pub async fn set_room_set_point(&self, room_id: &str, celsius: f64) -> Result<Resource> {
        self.patch(ResourceKind::Rooms, room_id, json!({ "set-point-c": celsius }))
            .await
    }

    pub async fn set_room_away(&self, room_id: &str, away: bool) -> Result<Resource> {
        self.patch(ResourceKind::Rooms, room_id, json!({ "active": !away }))
            .await
    }

    pub async fn structures(&self) -> Result<Vec<Resource>> {
        self.list(ApiRequest::get(ResourceKind::Structures.collection_path()))
            .await
    }

    /// The first structure on the account.
    pub async fn primary_structure(&self) -> Result<Resource> {
        self.structures()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FlairError::NotFound("No structures found".to_string()))
    }

    pub async fn structure(&self, structure_id: &str) -> Result<Resource> {
        self.one(ApiRequest::get(
            ResourceKind::Structures.item_path(structure_id),
        ))
        .await
    }

    pub async fn set_structure_mode(
        &self,
        structure_id: &str,
        mode: StructureMode,
    ) -> Result<Resource> {
        self.patch(
            ResourceKind::Structures,
            structure_id,
            json!({ "mode": mode }),
        )
        .await
    }

    pub async fn set_structure_heat_cool_mode(
        &self,
        structure_id: &str,
        mode: StructureHeatCoolMode,
    ) -> Result<Resource> {
        self.patch(
            ResourceKind::Structures,
            structure_id,
            json!({ "structure-heat-cool-mode": mode }),
        )
        .await
    }

    pub async fn set_structure_set_point(
        &self,
        structure_id: &str,
        celsius: f64,
    ) -> Result<Resource> {
        self.patch(
            ResourceKind::Structures,
            structure_id,
            json!({ "set-point-temperature-c": celsius }),
        )
        .await
    }

    async fn list(&self, request: ApiRequest) -> Result<Vec<Resource>> {
        let doc: Document<Vec<Resource>> = self.pipeline.execute_json(&request).await?;
        Ok(doc.data)
    }

    async fn one(&self, request: ApiRequest) -> Result<Resource> {
        let doc: Document<Resource> = self.pipeline.execute_json(&request).await?;
        Ok(doc.data)
    }

    async fn patch(
        &self,
        kind: ResourceKind,
        id: &str,
        attributes: serde_json::Value,
    ) -> Result<Resource> {
        self.one(ApiRequest::patch(kind.item_path(id), attributes))
            .await
    }
}
