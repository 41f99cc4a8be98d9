//! Catalog sources: where entities come from.
//!
//! The pipeline only sees [`CatalogSource`]. [`BackstageClient`] talks to a
//! live catalog; [`FileCatalog`] and [`StaticCatalog`] evaluate the filter
//! locally over a fixed entity list.

mod client;
mod entity;
mod filter;

pub use client::{BackstageClient, ENTITIES_PATH};
pub use entity::{entities_from_json, Annotations, Entity, EntityMetadata};
pub use filter::{EntityFilter, DEFAULT_FILTER};

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can list catalog entities for a filter.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// List entities matching `filter`, in catalog order.
    async fn list(&self, filter: &EntityFilter) -> Result<Vec<Entity>>;
}

/// In-memory entity list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entities: Vec<Entity>,
}

impl StaticCatalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn describe(&self) -> String {
        format!("static catalog ({} entities)", self.entities.len())
    }

    async fn list(&self, filter: &EntityFilter) -> Result<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

/// JSON file holding an array of entities, as returned by the catalog API.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    fn describe(&self) -> String {
        format!("entity file {}", self.path.display())
    }

    async fn list(&self, filter: &EntityFilter) -> Result<Vec<Entity>> {
        let data = std::fs::read(&self.path)?;
        let entities = entities_from_json(&data)?;
        debug!(path = %self.path.display(), total = entities.len(), "loaded entity file");
        Ok(entities.into_iter().filter(|e| filter.matches(e)).collect())
    }
}
