//! Protobuf text-format encoding for `ProberConfig`.
//!
//! Only the message shapes probegen produces are encoded. Fields are
//! emitted in schema order; empty repeated fields are omitted.

use crate::probe::{ProbeDefinition, ProberConfig};

/// A text-format field value.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    /// Pre-rendered scalar (quoted string or bare enum name).
    Scalar(String),
    Message(Vec<(&'static str, Value)>),
}

fn string(s: &str) -> Value {
    Value::Scalar(quote(s))
}

fn enum_name(name: impl ToString) -> Value {
    Value::Scalar(name.to_string())
}

/// Quote a string with C-style escapes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn probe_fields(def: &ProbeDefinition) -> Vec<(&'static str, Value)> {
    let http = &def.http_probe;
    let mut http_fields = vec![
        ("protocol", enum_name(http.protocol)),
        ("relative_url", string(&http.relative_url)),
        ("method", enum_name(http.method)),
    ];
    http_fields.extend(http.body.iter().map(|b| ("body", string(b))));

    vec![
        ("name", string(&def.name)),
        ("type", enum_name(def.probe_type)),
        (
            "targets",
            Value::Message(vec![("host_names", string(&def.targets.host_names))]),
        ),
        ("interval", string(&def.interval)),
        ("http_probe", Value::Message(http_fields)),
    ]
}

fn config_fields(config: &ProberConfig) -> Vec<(&'static str, Value)> {
    config
        .probe
        .iter()
        .map(|p| ("probe", Value::Message(probe_fields(p))))
        .collect()
}

fn render_compact(fields: &[(&'static str, Value)], out: &mut String) {
    for (i, (name, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push(':');
        match value {
            Value::Scalar(s) => out.push_str(s),
            Value::Message(inner) => {
                out.push('{');
                render_compact(inner, out);
                out.push('}');
            }
        }
    }
}

fn render_pretty(fields: &[(&'static str, Value)], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for (name, value) in fields {
        out.push_str(&indent);
        out.push_str(name);
        match value {
            Value::Scalar(s) => {
                out.push_str(": ");
                out.push_str(s);
                out.push('\n');
            }
            Value::Message(inner) => {
                out.push_str(": {\n");
                render_pretty(inner, depth + 1, out);
                out.push_str(&indent);
                out.push_str("}\n");
            }
        }
    }
}

/// Single-line encoding.
pub fn to_compact(config: &ProberConfig) -> String {
    let mut out = String::new();
    render_compact(&config_fields(config), &mut out);
    out
}

/// Indented, one field per line.
pub fn to_pretty(config: &ProberConfig) -> String {
    let mut out = String::new();
    render_pretty(&config_fields(config), 0, &mut out);
    out
}
