//! Annotation to probe-definition mapping.
//!
//! Each entity's annotations are scanned once, in order. Any key starting with
//! `<namespace>/probe` marks the entity as configured; keys that exactly match
//! `<namespace>/<suffix>` for a suffix in [`ANNOTATION_FIELDS`] update one field
//! of the probe being built. Unknown keys and unknown enum values are ignored,
//! so the mapper never fails.

use super::{
    HttpMethod, HttpProbe, HttpProtocol, ProbeDefinition, ProbeType, TargetsDef,
    DEFAULT_INTERVAL, DEFAULT_PROBE_KIND,
};
use crate::catalog::Entity;
use tracing::{debug, info, trace};

/// Working state for one entity.
#[derive(Debug, Clone)]
struct ProbeDraft {
    kind: String,
    targets: String,
    interval: String,
    http: HttpProbe,
}

impl Default for ProbeDraft {
    fn default() -> Self {
        Self {
            kind: DEFAULT_PROBE_KIND.to_string(),
            targets: String::new(),
            interval: DEFAULT_INTERVAL.to_string(),
            http: HttpProbe::default(),
        }
    }
}

impl ProbeDraft {
    fn finish(self, entity_name: &str) -> ProbeDefinition {
        ProbeDefinition {
            name: ProbeDefinition::name_for(entity_name),
            // `kind` is carried but does not select the variant.
            probe_type: ProbeType::Http,
            requested_kind: self.kind,
            targets: TargetsDef {
                host_names: self.targets,
            },
            interval: self.interval,
            http_probe: self.http,
        }
    }
}

/// A recognised annotation suffix and the field it sets.
pub struct AnnotationField {
    /// Key suffix after `<namespace>/`.
    pub suffix: &'static str,
    apply: fn(&mut ProbeDraft, &str),
}

impl std::fmt::Debug for AnnotationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationField")
            .field("suffix", &self.suffix)
            .finish()
    }
}

/// All annotation fields understood by the mapper.
pub static ANNOTATION_FIELDS: &[AnnotationField] = &[
    AnnotationField {
        suffix: "probe-type",
        apply: |d, v| d.kind = v.to_string(),
    },
    AnnotationField {
        suffix: "probe-targets",
        apply: |d, v| d.targets = v.to_string(),
    },
    AnnotationField {
        suffix: "probe-interval",
        apply: |d, v| d.interval = v.to_string(),
    },
    AnnotationField {
        suffix: "probe-http-protocol",
        apply: |d, v| {
            if let Some(protocol) = HttpProtocol::from_annotation(v) {
                d.http.protocol = protocol;
            }
        },
    },
    AnnotationField {
        suffix: "probe-http-method",
        apply: |d, v| {
            if let Some(method) = HttpMethod::from_annotation(v) {
                d.http.method = method;
            }
        },
    },
    AnnotationField {
        suffix: "probe-http-relative-url",
        apply: |d, v| d.http.relative_url = v.to_string(),
    },
    AnnotationField {
        suffix: "probe-http-body",
        apply: |d, v| d.http.body.push(v.to_string()),
    },
];

fn field_for(suffix: &str) -> Option<&'static AnnotationField> {
    ANNOTATION_FIELDS.iter().find(|f| f.suffix == suffix)
}

/// Join a namespace and a key suffix: `<namespace>/<suffix>`.
pub fn scoped_key(namespace: &str, suffix: &str) -> String {
    format!("{namespace}/{suffix}")
}

/// Maps catalog entities to probe definitions for one annotation namespace.
#[derive(Debug, Clone)]
pub struct ProbeMapper {
    namespace: String,
    marker: String,
}

impl ProbeMapper {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let marker = scoped_key(&namespace, "probe");
        Self { namespace, marker }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully-qualified keys this mapper recognises, in table order.
    pub fn recognized_keys(&self) -> Vec<String> {
        ANNOTATION_FIELDS
            .iter()
            .map(|f| scoped_key(&self.namespace, f.suffix))
            .collect()
    }

    /// Map every entity, preserving input order and dropping unconfigured ones.
    pub fn map(&self, entities: &[Entity]) -> Vec<ProbeDefinition> {
        entities.iter().filter_map(|e| self.map_entity(e)).collect()
    }

    /// Map one entity. `None` when no annotation carries the probe marker.
    pub fn map_entity(&self, entity: &Entity) -> Option<ProbeDefinition> {
        let name = entity.name();
        debug!(component = %name, "checking component for annotations");

        let mut draft = ProbeDraft::default();
        let mut configured = false;

        for (key, value) in entity.annotations() {
            trace!(component = %name, "annotation: {}={}", key, value);

            if key.starts_with(&self.marker) {
                configured = true;
            }

            let field = key
                .strip_prefix(self.namespace.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(field_for);
            match field {
                Some(field) => (field.apply)(&mut draft, value),
                None => trace!(component = %name, key = %key, "ignoring annotation"),
            }
        }

        if !configured {
            return None;
        }

        info!(
            "defining probe for {} ({}) of type {}",
            name, entity.kind, draft.kind
        );
        Some(draft.finish(name))
    }
}

/// Map `entities` under `namespace`. Pure and total.
pub fn map_entities(entities: &[Entity], namespace: &str) -> Vec<ProbeDefinition> {
    ProbeMapper::new(namespace).map(entities)
}
