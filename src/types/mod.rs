//! Resource representations returned by the Flair API.
//!
//! The API speaks JSON:API; resources are kept loosely typed so the caller
//! decides which attributes it cares about.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level JSON:API document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// A single JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
}

impl Resource {
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attribute(name)?.as_str()
    }

    pub fn attribute_f64(&self, name: &str) -> Option<f64> {
        self.attribute(name)?.as_f64()
    }

    pub fn attribute_bool(&self, name: &str) -> Option<bool> {
        self.attribute(name)?.as_bool()
    }

    /// Display name, when the resource has one.
    pub fn name(&self) -> Option<&str> {
        self.attribute_str("name")
    }
}

/// Resource collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Users,
    Pucks,
    Vents,
    Rooms,
    Structures,
}

impl ResourceKind {
    pub fn collection_path(self) -> String {
        format!("/api/{self}")
    }

    pub fn item_path(self, id: &str) -> String {
        format!("/api/{self}/{id}")
    }
}

/// Who drives vent positions in a structure: the user or Flair's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StructureMode {
    Manual,
    Auto,
}

/// HVAC direction for a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StructureHeatCoolMode {
    Off,
    Cool,
    Heat,
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_parses_json_api_object() {
        let doc: Document<Resource> = serde_json::from_value(json!({
            "data": {
                "id": "r1",
                "type": "rooms",
                "attributes": {"name": "Office", "set-point-c": 21.5, "active": true}
            }
        }))
        .unwrap();
        let room = doc.data;
        assert_eq!(room.kind, "rooms");
        assert_eq!(room.name(), Some("Office"));
        assert_eq!(room.attribute_f64("set-point-c"), Some(21.5));
        assert_eq!(room.attribute_bool("active"), Some(true));
        assert!(room.relationships.is_none());
    }

    #[test]
    fn paths_follow_collection_names() {
        assert_eq!(ResourceKind::Rooms.collection_path(), "/api/rooms");
        assert_eq!(ResourceKind::Vents.item_path("v9"), "/api/vents/v9");
    }

    #[test]
    fn structure_mode_round_trips_as_lowercase() {
        assert_eq!(StructureMode::Auto.to_string(), "auto");
        assert_eq!("manual".parse::<StructureMode>().unwrap(), StructureMode::Manual);
        assert_eq!(json!(StructureMode::Manual), json!("manual"));
    }

    #[test]
    fn heat_cool_mode_covers_off() {
        assert_eq!(json!(StructureHeatCoolMode::Off), json!("off"));
        assert_eq!("heat".parse::<StructureHeatCoolMode>().unwrap(), StructureHeatCoolMode::Heat);
    }
}
