//! Run configuration for probe generation.
//!
//! Everything the pipeline needs is carried in [`GeneratorConfig`] and passed
//! explicitly; nothing is read from process globals.

use crate::catalog::{BackstageClient, CatalogSource, EntityFilter, FileCatalog, DEFAULT_FILTER};
use crate::error::{ProbegenError, Result};
use crate::timeout::DEFAULT_TIMEOUT_SECONDS;
use crate::writer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Annotation namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "github.com/nrhtr/probegen";

/// Where entities are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// Live catalog reached over HTTP.
    Catalog {
        url: String,
        /// Bearer token; never serialized.
        #[serde(skip)]
        token: Option<String>,
        #[serde(default)]
        page_size: Option<usize>,
    },
    /// JSON file holding an entity array.
    File { path: PathBuf },
}

impl SourceConfig {
    /// Build the catalog source this configuration describes.
    pub fn build(&self) -> Result<Box<dyn CatalogSource>> {
        match self {
            SourceConfig::Catalog {
                url,
                token,
                page_size,
            } => {
                let client = BackstageClient::new(url, token.as_deref())?
                    .with_page_size(page_size.unwrap_or(0));
                Ok(Box::new(client))
            }
            SourceConfig::File { path } => Ok(Box::new(FileCatalog::new(path.clone()))),
        }
    }
}

/// Master configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Entity source; required.
    pub source: Option<SourceConfig>,
    /// Annotation namespace prefix (no trailing slash).
    pub namespace: String,
    /// Catalog filter expression.
    pub filter: String,
    /// Output document format.
    pub format: OutputFormat,
    /// Indent the output document.
    pub pretty: bool,
    /// Upper bound on catalog retrieval, in seconds.
    pub timeout_seconds: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            format: OutputFormat::default(),
            pretty: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl GeneratorConfig {
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = Some(source);
        self
    }

    /// Reject configurations that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        let source = self.source.as_ref().ok_or_else(|| {
            ProbegenError::InvalidConfig("a catalog URL or an input file is required".into())
        })?;
        if let SourceConfig::Catalog { url, .. } = source {
            if url.trim().is_empty() {
                return Err(ProbegenError::InvalidConfig(
                    "catalog URL must not be empty".into(),
                ));
            }
        }
        if self.namespace.trim().is_empty() {
            return Err(ProbegenError::InvalidConfig(
                "namespace must not be empty".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ProbegenError::InvalidConfig(
                "timeout must be at least one second".into(),
            ));
        }
        self.entity_filter()?;
        Ok(())
    }

    /// Namespace with any trailing `/` removed.
    pub fn normalized_namespace(&self) -> &str {
        self.namespace.trim_end_matches('/')
    }

    pub fn entity_filter(&self) -> Result<EntityFilter> {
        EntityFilter::parse(&self.filter)
    }
}
