use crate::common::test_data::CATALOG_PAGE;
use crate::common::test_utils::CannedServer;
use probegen::catalog::{BackstageClient, CatalogSource, EntityFilter};
use probegen::ProbegenError;

fn client(server: &CannedServer, token: Option<&str>) -> BackstageClient {
    let builder = reqwest::Client::builder().no_proxy();
    BackstageClient::with_builder(&server.base_url, token, builder).unwrap()
}

/// JSON array of bare components with the given names.
fn page(names: &[&str]) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"kind":"Component","metadata":{{"name":"{n}"}}}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

#[tokio::test]
async fn lists_entities_with_filter_and_token() {
    let server = CannedServer::start(vec![(200, CATALOG_PAGE.to_string())]);
    let entities = client(&server, Some("s3cret"))
        .list(&EntityFilter::default())
        .await
        .unwrap();

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].name(), "foo");
    assert_eq!(entities[1].name(), "bar");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .starts_with("GET /api/catalog/entities?filter=kind%3Dcomponent HTTP/1.1"));
    assert!(requests[0]
        .to_ascii_lowercase()
        .contains("authorization: bearer s3cret"));
}

#[tokio::test]
async fn pages_until_short_page() {
    let server = CannedServer::start(vec![
        (200, page(&["a", "b"])),
        (200, page(&["c", "d"])),
        (200, page(&["e"])),
    ]);
    let entities = client(&server, None)
        .with_page_size(2)
        .list(&EntityFilter::default())
        .await
        .unwrap();

    let names: Vec<_> = entities.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].contains("offset=0&limit=2"));
    assert!(requests[1].contains("offset=2&limit=2"));
    assert!(requests[2].contains("offset=4&limit=2"));
}

#[tokio::test]
async fn oversized_page_is_returned_as_whole_list() {
    // Catalog ignores `limit` and always answers with all three entities.
    let server = CannedServer::start(vec![
        (200, page(&["a", "b", "c"])),
        (200, page(&["a", "b", "c"])),
    ]);
    let entities = client(&server, None)
        .with_page_size(2)
        .list(&EntityFilter::default())
        .await
        .unwrap();

    let names: Vec<_> = entities.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn repeated_full_page_stops_paging() {
    // Catalog honours `limit` but ignores `offset`.
    let server = CannedServer::start(vec![
        (200, page(&["a", "b"])),
        (200, page(&["a", "b"])),
        (200, page(&["a", "b"])),
    ]);
    let entities = client(&server, None)
        .with_page_size(2)
        .list(&EntityFilter::default())
        .await
        .unwrap();

    let names: Vec<_> = entities.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn unauthorized_is_catalog_status_error() {
    let server = CannedServer::start(vec![(401, r#"{"error":"nope"}"#.to_string())]);
    let err = client(&server, None)
        .list(&EntityFilter::default())
        .await
        .unwrap_err();
    match err {
        ProbegenError::CatalogStatus { status, message, .. } => {
            assert_eq!(status, 401);
            assert!(message.contains("not authorized"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_carries_body_text() {
    let server = CannedServer::start(vec![(500, "catalog backend down".to_string())]);
    let err = client(&server, None)
        .list(&EntityFilter::default())
        .await
        .unwrap_err();
    assert!(err.is_catalog_failure());
    assert!(err.to_string().contains("catalog backend down"));
}

#[tokio::test]
async fn malformed_payload_is_decode_error() {
    let server = CannedServer::start(vec![(200, r#"{"items":[]}"#.to_string())]);
    let err = client(&server, None)
        .list(&EntityFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProbegenError::Decode(_)));
}
