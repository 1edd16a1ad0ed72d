//! Tests for the auth module

use super::*;
use std::collections::HashMap;

fn apply(config: AuthConfig) -> reqwest::Request {
    let auth = Authenticator::new(config);
    let client = reqwest::Client::new();
    let req = client.get("http://localhost:9200/_mapping");
    auth.apply(req).build().unwrap()
}

#[test]
fn test_no_auth() {
    let built = apply(AuthConfig::None);
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_basic_auth() {
    let built = apply(AuthConfig::Basic {
        username: "elastic".to_string(),
        password: "changeme".to_string(),
    });

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Basic ZWxhc3RpYzpjaGFuZ2VtZQ=="
    );
}

#[test]
fn test_bearer_auth() {
    let built = apply(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
}

#[test]
fn test_api_key_auth() {
    let built = apply(AuthConfig::ApiKey {
        value: "VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw==".to_string(),
    });

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "ApiKey VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw=="
    );
}

#[test]
fn test_custom_headers() {
    let mut headers = HashMap::new();
    headers.insert("X-Found-Cluster".to_string(), "prod".to_string());
    headers.insert("X-Opaque-Id".to_string(), "reverse".to_string());

    let built = apply(AuthConfig::CustomHeaders { headers });

    assert_eq!(built.headers().get("X-Found-Cluster").unwrap(), "prod");
    assert_eq!(built.headers().get("X-Opaque-Id").unwrap(), "reverse");
}

#[test]
fn test_scheme_names() {
    assert_eq!(AuthConfig::None.scheme(), "none");
    assert_eq!(AuthConfig::ApiKey { value: String::new() }.scheme(), "api_key");
    assert_eq!(
        AuthConfig::Bearer {
            token: String::new()
        }
        .scheme(),
        "bearer"
    );
}

#[test]
fn test_debug_hides_secrets() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "elastic".to_string(),
        password: "hunter2".to_string(),
    });
    let debug_str = format!("{auth:?}");

    assert!(debug_str.contains("basic"));
    assert!(!debug_str.contains("hunter2"));
}
