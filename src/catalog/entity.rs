//! Catalog entity envelope.
//!
//! Only the fields probegen reads are modelled; everything else in the
//! catalog's JSON is ignored on decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Annotations in document order. Duplicate keys keep the last value.
pub type Annotations = IndexMap<String, String>;

/// Entity metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,
}

/// A catalog entity (component, API, system, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMetadata,
}

impl Entity {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: "backstage.io/v1alpha1".to_string(),
            kind: kind.into(),
            metadata: EntityMetadata {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    /// Shorthand for a `Component` entity.
    pub fn component(name: impl Into<String>) -> Self {
        Self::new("Component", name)
    }

    /// Builder-style annotation setter. Later pairs overwrite earlier ones.
    pub fn with_annotations<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.metadata.annotations.insert(k.into(), v.into());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn annotations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata
            .annotations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }
}

/// Decode a JSON array of entities.
pub fn entities_from_json(data: &[u8]) -> crate::error::Result<Vec<Entity>> {
    Ok(serde_json::from_slice(data)?)
}
