//! Error types for probe generation.
//!
//! The mapping step itself cannot fail; every variant here comes from
//! configuration, catalog access, or writing the generated document.

use thiserror::Error;

/// Main error type for probegen operations.
#[derive(Debug, Error)]
pub enum ProbegenError {
    /// Configuration rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entity filter could not be parsed
    #[error("Invalid entity filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    /// Catalog answered with a non-success status
    #[error("Catalog request to {url} failed with status {status}: {message}")]
    CatalogStatus {
        url: String,
        status: u16,
        message: String,
    },

    /// Transport-level failure talking to the catalog
    #[error("Catalog transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Catalog payload could not be decoded
    #[error("Failed to decode catalog entities: {0}")]
    Decode(#[from] serde_json::Error),

    /// Catalog retrieval timed out
    #[error("Catalog request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Output document could not be produced
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for probegen operations
pub type Result<T> = std::result::Result<T, ProbegenError>;

impl ProbegenError {
    /// True for failures caused by the catalog rather than local setup.
    pub fn is_catalog_failure(&self) -> bool {
        matches!(
            self,
            ProbegenError::CatalogStatus { .. }
                | ProbegenError::Transport(_)
                | ProbegenError::Decode(_)
                | ProbegenError::Timeout { .. }
        )
    }
}
