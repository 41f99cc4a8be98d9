//! Generate Cloudprober probe configuration from catalog annotations.
//!
//! Components in a Backstage-style catalog opt into monitoring by carrying
//! annotations such as `<namespace>/probe-targets`. probegen lists those
//! entities, maps their annotations to HTTP probe definitions and writes a
//! `ProberConfig` document.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod timeout;
pub mod writer;

pub use catalog::{CatalogSource, Entity, EntityFilter};
pub use config::{GeneratorConfig, SourceConfig, DEFAULT_NAMESPACE};
pub use error::{ProbegenError, Result};
pub use pipeline::{generate, run, RunSummary};
pub use probe::{map_entities, ProbeDefinition, ProbeMapper, ProberConfig};
pub use writer::OutputFormat;
