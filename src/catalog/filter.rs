//! Entity filters in catalog query syntax: `key=value[,key=value...]`.
//!
//! The raw string is forwarded as-is to the HTTP catalog. Local sources
//! evaluate it themselves with [`EntityFilter::matches`].

use super::Entity;
use crate::error::{ProbegenError, Result};
use std::fmt;
use std::str::FromStr;

/// Filter used when none is configured.
pub const DEFAULT_FILTER: &str = "kind=component";

/// A conjunction of `key=value` conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFilter {
    raw: String,
    conditions: Vec<(String, String)>,
}

impl EntityFilter {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |message: &str| ProbegenError::InvalidFilter {
            filter: raw.to_string(),
            message: message.to_string(),
        };

        let mut conditions = Vec::new();
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty condition"));
            }
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid("condition is missing '='"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(invalid("condition has an empty key"));
            }
            conditions.push((key.to_string(), value.trim().to_string()));
        }

        Ok(Self {
            raw: raw.trim().to_string(),
            conditions,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Evaluate against an entity. Keys and `kind` compare case-insensitively,
    /// other values exactly. Unsupported keys never match.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.conditions
            .iter()
            .all(|(key, value)| condition_matches(entity, key, value))
    }
}

fn condition_matches(entity: &Entity, key: &str, value: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    match lower.as_str() {
        "kind" => entity.kind.eq_ignore_ascii_case(value),
        "metadata.name" => entity.metadata.name == value,
        "metadata.namespace" => {
            entity.metadata.namespace.as_deref().unwrap_or("default") == value
        }
        _ => match lower.strip_prefix("metadata.annotations.") {
            // Annotation keys keep their original case.
            Some(_) => {
                let annotation_key = &key["metadata.annotations.".len()..];
                entity.annotation(annotation_key) == Some(value)
            }
            None => false,
        },
    }
}

impl Default for EntityFilter {
    fn default() -> Self {
        Self {
            raw: DEFAULT_FILTER.to_string(),
            conditions: vec![("kind".to_string(), "component".to_string())],
        }
    }
}

impl FromStr for EntityFilter {
    type Err = ProbegenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
