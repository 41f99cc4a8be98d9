//! Probe configuration model.
//!
//! These types mirror the subset of Cloudprober's `ProberConfig` that
//! probegen emits: HTTP probes against a host-name target list.

pub mod mapper;

pub use mapper::{map_entities, scoped_key, AnnotationField, ProbeMapper, ANNOTATION_FIELDS};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default probe interval when no `probe-interval` annotation is present.
pub const DEFAULT_INTERVAL: &str = "10s";
/// Default relative URL when no `probe-http-relative-url` annotation is present.
pub const DEFAULT_RELATIVE_URL: &str = "/";
/// Probe kind assumed when no `probe-type` annotation is present.
pub const DEFAULT_PROBE_KIND: &str = "HTTP";
/// Prefix prepended to the entity name to form the probe name.
pub const PROBE_NAME_PREFIX: &str = "probe-";

/// Outer probe discriminant. Only HTTP probes are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProbeType {
    #[default]
    #[serde(rename = "HTTP")]
    Http,
}

impl fmt::Display for ProbeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeType::Http => write!(f, "HTTP"),
        }
    }
}

/// Scheme used by an HTTP probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpProtocol {
    #[serde(rename = "HTTP")]
    Http,
    #[default]
    #[serde(rename = "HTTPS")]
    Https,
}

impl HttpProtocol {
    /// Parse an annotation value. Matching is exact; anything else is `None`.
    pub fn from_annotation(value: &str) -> Option<Self> {
        match value {
            "HTTPS" => Some(HttpProtocol::Https),
            "HTTP" => Some(HttpProtocol::Http),
            _ => None,
        }
    }
}

impl fmt::Display for HttpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpProtocol::Http => write!(f, "HTTP"),
            HttpProtocol::Https => write!(f, "HTTPS"),
        }
    }
}

/// Request method used by an HTTP probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl HttpMethod {
    /// Parse an annotation value. Matching is exact; anything else is `None`.
    pub fn from_annotation(value: &str) -> Option<Self> {
        match value {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Target selection. The host list is kept as the raw annotation string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetsDef {
    pub host_names: String,
}

/// HTTP-specific probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProbe {
    pub protocol: HttpProtocol,
    pub relative_url: String,
    pub method: HttpMethod,
    /// Body fragments, in annotation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self {
            protocol: HttpProtocol::default(),
            relative_url: DEFAULT_RELATIVE_URL.to_string(),
            method: HttpMethod::default(),
            body: Vec::new(),
        }
    }
}

/// A single generated probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub probe_type: ProbeType,
    /// Raw `probe-type` annotation value. Recorded for diagnostics only; it
    /// never changes `probe_type`.
    #[serde(skip)]
    pub requested_kind: String,
    pub targets: TargetsDef,
    pub interval: String,
    pub http_probe: HttpProbe,
}

impl ProbeDefinition {
    /// Probe name derived from a catalog entity name.
    pub fn name_for(entity_name: &str) -> String {
        format!("{PROBE_NAME_PREFIX}{entity_name}")
    }
}

/// Top-level container handed to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProberConfig {
    #[serde(default)]
    pub probe: Vec<ProbeDefinition>,
}

impl ProberConfig {
    pub fn new(probe: Vec<ProbeDefinition>) -> Self {
        Self { probe }
    }

    pub fn len(&self) -> usize {
        self.probe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probe.is_empty()
    }
}
