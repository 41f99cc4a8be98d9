//! Serialization of the generated `ProberConfig`.

pub mod text;

use crate::error::{ProbegenError, Result};
use crate::probe::ProberConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Protobuf text format, as read by Cloudprober `.cfg` files.
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ProbegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "textproto" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProbegenError::InvalidConfig(format!(
                "unknown output format '{other}' (expected 'text' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render `config` to a string.
pub fn render(config: &ProberConfig, format: OutputFormat, pretty: bool) -> Result<String> {
    match (format, pretty) {
        (OutputFormat::Text, false) => Ok(text::to_compact(config)),
        (OutputFormat::Text, true) => Ok(text::to_pretty(config)),
        (OutputFormat::Json, false) => {
            serde_json::to_string(config).map_err(|e| ProbegenError::Serialization(e.to_string()))
        }
        (OutputFormat::Json, true) => serde_json::to_string_pretty(config)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| ProbegenError::Serialization(e.to_string())),
    }
}

/// Render `config` and write it to `sink`.
pub fn write<W: Write>(
    config: &ProberConfig,
    format: OutputFormat,
    pretty: bool,
    sink: &mut W,
) -> Result<()> {
    let data = render(config, format, pretty)?;
    debug!(bytes = data.len(), format = %format, pretty, "writing probe config");
    sink.write_all(data.as_bytes())?;
    sink.flush()?;
    Ok(())
}
