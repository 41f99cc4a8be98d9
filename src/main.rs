use anyhow::Context;
use clap::Parser;
use probegen::catalog::DEFAULT_FILTER;
use probegen::config::{GeneratorConfig, SourceConfig, DEFAULT_NAMESPACE};
use probegen::timeout::DEFAULT_TIMEOUT_SECONDS;
use probegen::{logging, pipeline, OutputFormat};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "probegen",
    version,
    about = "Generate Cloudprober probe definitions from catalog annotations"
)]
struct Args {
    /// URL for the catalog, e.g. https://backstage.ops.example.com/
    #[arg(long, required_unless_present = "input_file")]
    backstage_url: Option<String>,

    /// Read entities from a JSON file instead of the catalog
    #[arg(long, conflicts_with = "backstage_url")]
    input_file: Option<PathBuf>,

    /// Namespace with which to prefix annotation keys (e.g. example.com)
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Catalog entity filter
    #[arg(long, default_value = DEFAULT_FILTER)]
    filter: String,

    /// Whether or not to format the generated config
    #[arg(long)]
    pretty: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Bearer token for the catalog
    #[arg(long, env = "BACKSTAGE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Fetch entities in pages of this size
    #[arg(long)]
    page_size: Option<usize>,

    /// Catalog request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout_secs: u64,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn into_config(self) -> GeneratorConfig {
        let source = match (self.backstage_url, self.input_file) {
            (_, Some(path)) => Some(SourceConfig::File { path }),
            (Some(url), None) => Some(SourceConfig::Catalog {
                url,
                token: self.token,
                page_size: self.page_size,
            }),
            (None, None) => None,
        };
        GeneratorConfig {
            source,
            namespace: self.namespace,
            filter: self.filter,
            format: self.format,
            pretty: self.pretty,
            timeout_seconds: self.timeout_secs,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_json);

    let config = args.into_config();
    config.validate().context("invalid configuration")?;

    let source = config
        .source
        .as_ref()
        .context("no entity source configured")?
        .build()
        .context("unable to initialise catalog client")?;

    let mut stdout = std::io::stdout().lock();
    let summary = pipeline::run(&config, source.as_ref(), &mut stdout)
        .await
        .context("error generating probe definitions")?;

    info!(
        entities = summary.entities,
        probes = summary.probes,
        "probe generation finished"
    );
    Ok(())
}
