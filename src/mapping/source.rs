//! Mapping fetch from a live cluster

use super::request::MappingRequest;
use super::response::parse_mapping_response;
use super::types::TypeMapping;
use crate::auth::AuthConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

/// Where mappings (and sample documents) come from.
///
/// Failures are returned to the caller untouched.
#[async_trait]
pub trait MappingSource: Send + Sync {
    /// Fetch the raw get-mapping response for the request
    async fn fetch_mapping(&self, request: &MappingRequest) -> Result<Value>;

    /// Fetch one document of the index (and type) to refine inference with
    async fn fetch_sample(&self, index: &str, type_name: Option<&str>) -> Result<Option<Value>>;
}

/// Fetch and split the mappings for a request
pub async fn fetch_type_mappings(
    source: &dyn MappingSource,
    request: &MappingRequest,
) -> Result<Vec<TypeMapping>> {
    let response = source.fetch_mapping(request).await?;
    parse_mapping_response(&response)
}

/// [`MappingSource`] talking to a cluster over its REST API
#[derive(Debug)]
pub struct ClusterClient {
    http: HttpClient,
}

impl ClusterClient {
    /// Create a client for the cluster at `config.base_url`
    pub fn new(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config, auth)?,
        })
    }
}

#[async_trait]
impl MappingSource for ClusterClient {
    async fn fetch_mapping(&self, request: &MappingRequest) -> Result<Value> {
        let endpoint = request.endpoint();
        info!("Fetching mapping from {endpoint}");
        self.http.get_json(&endpoint, &[]).await
    }

    async fn fetch_sample(&self, index: &str, type_name: Option<&str>) -> Result<Option<Value>> {
        let endpoint = match type_name {
            Some(type_name) => format!("/{index}/{type_name}/_search"),
            None => format!("/{index}/_search"),
        };
        debug!("Fetching sample document from {endpoint}");

        let response = self.http.get_json(&endpoint, &[("size", "1")]).await?;

        Ok(response
            .pointer("/hits/hits/0")
            .filter(|hit| hit.is_object())
            .cloned())
    }
}
