//! JSON:API resource documents as served by the board API.
//!
//! `id` and `type` are the only fields a resource must carry; everything
//! under `attributes` is optional and decoded leniently by the extractor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level document: a primary resource plus a flat list of related ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default)]
    pub data: Option<Resource>,
    #[serde(default)]
    pub included: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
}

impl Resource {
    pub fn is_post(&self) -> bool {
        self.kind == "post"
    }

    /// Typed view of a post's attributes.
    pub fn post_attributes(&self) -> PostAttributes {
        PostAttributes::from_value(&self.attributes)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostAttributes {
    pub content: Option<PostContent>,
    pub map_props: Option<MapProps>,
    pub created_at: Option<String>,
    pub color: Option<String>,
}

impl PostAttributes {
    /// Decodes each attribute on its own: one unreadable attribute is
    /// treated as absent instead of discarding its siblings.
    pub fn from_value(attributes: &Value) -> Self {
        fn field<T: DeserializeOwned>(attributes: &Value, key: &str) -> Option<T> {
            attributes.get(key).and_then(|v| T::deserialize(v).ok())
        }

        Self {
            content: field(attributes, "content"),
            map_props: field(attributes, "mapProps"),
            created_at: field(attributes, "createdAt"),
            color: field(attributes, "color"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    pub subject: Option<String>,
    pub body_html: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapProps {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
}

/// A fetched board: the raw document, kept verbatim for backups, and its
/// typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub raw: Value,
    pub document: BoardDocument,
}

impl BoardSnapshot {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let document = BoardDocument::deserialize(&raw)?;
        Ok(Self { raw, document })
    }

    /// Board title from the primary resource, when present.
    pub fn title(&self) -> Option<&str> {
        self.document
            .data
            .as_ref()
            .and_then(|d| d.attributes.get("title"))
            .and_then(Value::as_str)
    }
}
