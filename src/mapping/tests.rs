//! Tests for the mapping module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::HttpClientConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cluster_for(server: &MockServer) -> ClusterClient {
    let config = HttpClientConfig::new(server.uri())
        .with_max_retries(0)
        .with_rate_limit(None);
    ClusterClient::new(config, AuthConfig::None).unwrap()
}

// ============================================================================
// MappingNode
// ============================================================================

#[test]
fn test_mapping_node_keeps_params_in_order() {
    let node = MappingNode::from_value(&json!({
        "type": "text",
        "store": true,
        "boost": 2.0,
        "analyzer": "standard",
        "fields": { "raw": { "type": "keyword" } }
    }))
    .unwrap();

    assert_eq!(node.field_type.as_deref(), Some("text"));
    assert!(node.fields.is_some());
    let params: Vec<&str> = node.params.keys().map(String::as_str).collect();
    assert_eq!(params, ["store", "boost", "analyzer"]);
    assert_eq!(node.param("boost"), Some(&json!(2.0)));
}

#[test]
fn test_mapping_node_children() {
    let node = MappingNode::from_value(&json!({
        "properties": {
            "user": { "properties": { "name": { "type": "keyword" } } }
        }
    }))
    .unwrap();

    let user = node.field("user").unwrap();
    assert!(user.field_type.is_none());
    assert_eq!(
        user.field("name").unwrap().field_type.as_deref(),
        Some("keyword")
    );
}

#[test]
fn test_mapping_node_rejects_malformed_properties() {
    let err = MappingNode::from_value(&json!({ "properties": 42 })).unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// Response parsing
// ============================================================================

#[test]
fn test_parse_typed_response() {
    let response = json!({
        "blog": {
            "mappings": {
                "post": { "properties": { "title": { "type": "text" } } },
                "comment": { "properties": { "body": { "type": "text" } } }
            }
        },
        "logs": {
            "mappings": {
                "event": { "properties": { "level": { "type": "keyword" } } }
            }
        }
    });

    let mappings = parse_mapping_response(&response).unwrap();

    let names: Vec<(&str, Option<&str>)> = mappings
        .iter()
        .map(|m| (m.index.as_str(), m.type_name.as_deref()))
        .collect();
    assert_eq!(
        names,
        [
            ("blog", Some("post")),
            ("blog", Some("comment")),
            ("logs", Some("event"))
        ]
    );
    assert!(mappings[0].mapping.field("title").is_some());
}

#[test]
fn test_parse_typeless_response() {
    let response = json!({
        "logs": {
            "mappings": {
                "dynamic": "strict",
                "properties": { "level": { "type": "keyword" } }
            }
        }
    });

    let mappings = parse_mapping_response(&response).unwrap();

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].index, "logs");
    assert_eq!(mappings[0].type_name, None);
    assert_eq!(mappings[0].mapping.param("dynamic"), Some(&json!("strict")));
    assert!(mappings[0].mapping.field("level").is_some());
}

#[test]
fn test_parse_skips_empty_mappings() {
    let response = json!({
        "empty": { "mappings": {} },
        "logs": { "mappings": { "properties": {} } }
    });

    let mappings = parse_mapping_response(&response).unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].index, "logs");
}

#[test]
fn test_parse_rejects_malformed_responses() {
    let not_object = parse_mapping_response(&json!([])).unwrap_err();
    assert!(matches!(not_object, Error::Mapping { .. }));

    let missing = parse_mapping_response(&json!({ "logs": {} })).unwrap_err();
    assert!(missing.to_string().contains("logs"));

    let scalar = parse_mapping_response(&json!({ "logs": { "mappings": 1 } })).unwrap_err();
    assert!(matches!(scalar, Error::Mapping { .. }));
}

// ============================================================================
// MappingRequest
// ============================================================================

#[test]
fn test_endpoint_variants() {
    assert_eq!(MappingRequest::new().endpoint(), "/_mapping");
    assert_eq!(
        MappingRequest::new()
            .with_index("blog")
            .with_index("logs")
            .endpoint(),
        "/blog,logs/_mapping"
    );
    assert_eq!(
        MappingRequest::new().with_type("post").endpoint(),
        "/_all/_mapping/post"
    );
    assert_eq!(
        MappingRequest::new()
            .with_index("blog")
            .with_type("post")
            .with_type("comment")
            .endpoint(),
        "/blog/_mapping/post,comment"
    );
}

#[test]
fn test_request_dedupes_and_clears() {
    let mut request = MappingRequest::new();
    request.add_index("blog");
    request.add_index("blog");
    request.add_type("post");
    request.add_type("post");

    assert_eq!(request.indices(), ["blog"]);
    assert_eq!(request.types(), ["post"]);

    request.clear();
    assert_eq!(request, MappingRequest::new());
    assert_eq!(request.endpoint(), "/_mapping");
}

// ============================================================================
// ClusterClient
// ============================================================================

#[tokio::test]
async fn test_fetch_type_mappings_from_cluster() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog/_mapping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blog": { "mappings": { "properties": { "title": { "type": "text" } } } }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cluster = cluster_for(&mock_server);
    let request = MappingRequest::new().with_index("blog");
    let mappings = fetch_type_mappings(&cluster, &request).await.unwrap();

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].index, "blog");
}

#[tokio::test]
async fn test_fetch_sample_returns_first_hit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog/post/_search"))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "hits": [
                { "_index": "blog", "_type": "post", "_id": "1", "_source": { "title": "hi" } }
            ] }
        })))
        .mount(&mock_server)
        .await;

    let cluster = cluster_for(&mock_server);
    let hit = cluster.fetch_sample("blog", Some("post")).await.unwrap().unwrap();

    assert_eq!(hit["_id"], "1");
    assert_eq!(hit["_source"]["title"], "hi");
}

#[tokio::test]
async fn test_fetch_sample_empty_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "total": 0, "hits": [] }
        })))
        .mount(&mock_server)
        .await;

    let cluster = cluster_for(&mock_server);
    assert_eq!(cluster.fetch_sample("logs", None).await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_mapping_propagates_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing/_mapping"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "root_cause": [{ "type": "index_not_found_exception", "reason": "no such index [missing]" }],
                "type": "index_not_found_exception",
                "reason": "no such index [missing]"
            },
            "status": 404
        })))
        .mount(&mock_server)
        .await;

    let cluster = cluster_for(&mock_server);
    let err = cluster
        .fetch_mapping(&MappingRequest::new().with_index("missing"))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "index_not_found_exception: no such index [missing]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_cluster_client_sends_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_mapping"))
        .and(header("Authorization", "ApiKey abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::new(mock_server.uri()).with_rate_limit(None);
    let cluster = ClusterClient::new(
        config,
        AuthConfig::ApiKey {
            value: "abc123".to_string(),
        },
    )
    .unwrap();

    let response = cluster.fetch_mapping(&MappingRequest::new()).await.unwrap();
    assert_eq!(response, json!({}));
}
