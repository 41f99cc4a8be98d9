//! One generation run: list entities, map them, write the config.

use crate::catalog::CatalogSource;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::probe::{ProbeMapper, ProberConfig};
use crate::timeout::{with_timeout, TimeoutConfig};
use crate::writer;
use std::io::Write;
use tracing::{info, Instrument};

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub entities: usize,
    pub probes: usize,
}

/// List and map, without writing. Catalog errors abort before mapping.
pub async fn generate(
    config: &GeneratorConfig,
    source: &dyn CatalogSource,
) -> Result<ProberConfig> {
    let (config_out, _) = collect(config, source).await?;
    Ok(config_out)
}

async fn collect(
    config: &GeneratorConfig,
    source: &dyn CatalogSource,
) -> Result<(ProberConfig, usize)> {
    let filter = config.entity_filter()?;
    let timeout = TimeoutConfig::new(config.timeout_seconds, "list catalog entities");

    let entities = with_timeout(timeout, source.list(&filter))
        .instrument(crate::span_trace!("catalog_list", source = %source.describe()))
        .await?;
    info!("found {} components in {}", entities.len(), source.describe());

    let mapper = ProbeMapper::new(config.normalized_namespace());
    let probes = mapper.map(&entities);
    info!(
        probes = probes.len(),
        namespace = mapper.namespace(),
        "generated probe definitions"
    );
    Ok((ProberConfig::new(probes), entities.len()))
}

/// Full run: list, map, then write to `sink`. Nothing is written on error.
pub async fn run<W: Write>(
    config: &GeneratorConfig,
    source: &dyn CatalogSource,
    sink: &mut W,
) -> Result<RunSummary> {
    let (prober, entities) = collect(config, source).await?;
    writer::write(&prober, config.format, config.pretty, sink)?;
    Ok(RunSummary {
        entities,
        probes: prober.len(),
    })
}
