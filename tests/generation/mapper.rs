use crate::common::{annotated, component, scoped, NS};
use probegen::probe::{HttpMethod, HttpProtocol, ProbeType};
use probegen::{map_entities, Entity, ProbeMapper};

#[test]
fn scenario_foo_gets_defaults_and_targets() {
    let entities = vec![component(
        "foo",
        &[
            ("example.com/probe-type", "HTTP"),
            ("example.com/probe-targets", "foo.example.com"),
        ],
    )];
    let probes = map_entities(&entities, NS);
    assert_eq!(probes.len(), 1);

    let p = &probes[0];
    assert_eq!(p.name, "probe-foo");
    assert_eq!(p.probe_type, ProbeType::Http);
    assert_eq!(p.targets.host_names, "foo.example.com");
    assert_eq!(p.http_probe.protocol, HttpProtocol::Https);
    assert_eq!(p.http_probe.method, HttpMethod::Get);
    assert_eq!(p.http_probe.relative_url, "/");
    assert_eq!(p.interval, "10s");
    assert!(p.http_probe.body.is_empty());
}

#[test]
fn wrong_namespace_emits_nothing() {
    let entities = vec![component("bar", &[("other/key", "x")])];
    assert!(map_entities(&entities, NS).is_empty());
}

#[test]
fn other_namespace_probe_keys_are_ignored() {
    let entities = vec![component("bar", &[("other.io/probe-targets", "x")])];
    assert!(map_entities(&entities, NS).is_empty());
}

#[test]
fn unrecognized_method_keeps_default_but_configures() {
    let entities = vec![annotated("baz", &[("probe-http-method", "DELETE")])];
    let probes = map_entities(&entities, NS);
    assert_eq!(probes.len(), 1);
    assert_eq!(probes[0].name, "probe-baz");
    assert_eq!(probes[0].http_probe.method, HttpMethod::Get);
    assert_eq!(probes[0].http_probe.protocol, HttpProtocol::Https);
}

#[test]
fn protocol_values_compare_exactly() {
    let entities = vec![annotated(
        "p",
        &[
            ("probe-http-protocol", "HTTP"),
            ("probe-interval", "1m"),
            ("probe-http-protocol-version", "2"),
        ],
    )];
    let probes = map_entities(&entities, NS);
    assert_eq!(probes[0].http_probe.protocol, HttpProtocol::Http);
    assert_eq!(probes[0].interval, "1m");

    // Lower-case values are not recognised.
    let entities = vec![annotated("q", &[("probe-http-protocol", "http")])];
    assert_eq!(
        map_entities(&entities, NS)[0].http_probe.protocol,
        HttpProtocol::Https
    );
}

#[test]
fn protocol_annotation_does_not_touch_relative_url() {
    let entities = vec![annotated("r", &[("probe-http-protocol", "HTTP")])];
    assert_eq!(map_entities(&entities, NS)[0].http_probe.relative_url, "/");
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(map_entities(&[], NS).is_empty());
}

#[test]
fn output_order_is_filtered_input_order() {
    let entities = vec![
        annotated("c", &[("probe-targets", "c.example.com")]),
        component("skip-me", &[]),
        annotated("a", &[("probe", "")]),
        component("skip-too", &[("team", "x")]),
        annotated("b", &[("probe-interval", "5s")]),
    ];
    let names: Vec<_> = map_entities(&entities, NS)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["probe-c", "probe-a", "probe-b"]);
}

#[test]
fn one_definition_per_configured_entity() {
    let entities: Vec<Entity> = (0..50)
        .map(|i| {
            if i % 3 == 0 {
                component(&format!("svc-{i}"), &[("unrelated", "1")])
            } else {
                annotated(
                    &format!("svc-{i}"),
                    &[("probe-targets", "h"), ("probe-type", "HTTP")],
                )
            }
        })
        .collect();
    let probes = map_entities(&entities, NS);
    let configured = entities
        .iter()
        .filter(|e| e.annotation(&scoped("probe-targets")).is_some())
        .count();
    assert_eq!(probes.len(), configured);
    let mut names: Vec<_> = probes.iter().map(|p| p.name.clone()).collect();
    names.dedup();
    assert_eq!(names.len(), probes.len());
}

#[test]
fn mapping_is_deterministic() {
    let entities = vec![annotated(
        "d",
        &[
            ("probe-http-body", "{\"ping\":true}"),
            ("probe-http-relative-url", "/ping"),
            ("probe-http-method", "POST"),
        ],
    )];
    let mapper = ProbeMapper::new(NS);
    assert_eq!(mapper.map(&entities), mapper.map(&entities));
    assert_eq!(
        mapper.map(&entities)[0].http_probe.body,
        vec!["{\"ping\":true}".to_string()]
    );
}
