//! Run configuration
//!
//! A YAML file naming the cluster to reverse-engineer, how to authenticate
//! against it, and which indices/types to cover.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::mapping::MappingRequest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete run configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cluster base URL
    #[serde(default)]
    pub url: String,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthDefinition,

    /// Indices to cover; empty means all
    #[serde(default)]
    pub indices: Vec<String>,

    /// Mapping types to cover; empty means all
    #[serde(default)]
    pub types: Vec<String>,

    /// Fetch one sample document per index/type
    #[serde(default = "default_sample")]
    pub sample: bool,

    /// Fail when part of a schema could not be inferred
    #[serde(default)]
    pub strict: bool,

    /// Directory of geometry snippets overriding the built-ins
    #[serde(default)]
    pub snippets_dir: Option<PathBuf>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_sample() -> bool {
    true
}

impl Config {
    /// Parsed cluster URL
    pub fn cluster_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }

    /// Mapping request covering the configured indices and types
    pub fn mapping_request(&self) -> MappingRequest {
        let mut request = MappingRequest::new();
        for index in &self.indices {
            request.add_index(index.as_str());
        }
        for type_name in &self.types {
            request.add_type(type_name.as_str());
        }
        request
    }

    /// HTTP client configuration pointing at the cluster
    pub fn http_client_config(&self) -> HttpClientConfig {
        let rate_limit = match self.http.requests_per_second {
            0 => None,
            rps => Some(RateLimiterConfig::per_second(rps)),
        };

        HttpClientConfig::new(self.url.as_str())
            .with_timeout(Duration::from_secs(self.http.timeout_secs))
            .with_max_retries(self.http.max_retries)
            .with_rate_limit(rate_limit)
    }

    /// Runtime auth configuration
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.clone().into()
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Authentication configuration from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDefinition {
    /// No authentication
    #[default]
    None,

    /// Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The token value
        token: String,
    },

    /// Cluster API key
    ApiKey {
        /// Encoded `id:api_key` credential
        value: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add
        headers: HashMap<String, String>,
    },
}

impl From<AuthDefinition> for AuthConfig {
    fn from(def: AuthDefinition) -> Self {
        match def {
            AuthDefinition::None => AuthConfig::None,
            AuthDefinition::Basic { username, password } => AuthConfig::Basic { username, password },
            AuthDefinition::Bearer { token } => AuthConfig::Bearer { token },
            AuthDefinition::ApiKey { value } => AuthConfig::ApiKey { value },
            AuthDefinition::CustomHeaders { headers } => AuthConfig::CustomHeaders { headers },
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request rate cap; 0 disables rate limiting
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

// ============================================================================
// Loading
// ============================================================================

/// Load a run configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load a run configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.url.trim().is_empty() {
        return Err(Error::missing_field("url"));
    }

    let url = config.cluster_url()?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_value(
            "url",
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(Error::invalid_value(
            "http.timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.indices.iter().any(|i| i.trim().is_empty()) {
        return Err(Error::invalid_value("indices", "index names cannot be empty"));
    }

    if config.types.iter().any(|t| t.trim().is_empty()) {
        return Err(Error::invalid_value("types", "type names cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_config() {
        let config = load_config_from_str("url: http://localhost:9200").unwrap();

        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.auth, AuthDefinition::None);
        assert!(config.indices.is_empty());
        assert!(config.sample);
        assert!(!config.strict);
        assert!(config.snippets_dir.is_none());
        assert_eq!(config.http, HttpSettings::default());
        assert_eq!(config.mapping_request().endpoint(), "/_mapping");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
url: https://search.example.com:9243/
auth:
  type: basic
  username: elastic
  password: changeme
indices: [logs, metrics]
types: [event]
sample: false
strict: true
snippets_dir: ./snippets
http:
  timeout_secs: 5
  max_retries: 1
  requests_per_second: 0
"#;

        let config = load_config_from_str(yaml).unwrap();

        assert_eq!(
            config.auth_config(),
            AuthConfig::Basic {
                username: "elastic".to_string(),
                password: "changeme".to_string()
            }
        );
        assert!(!config.sample);
        assert!(config.strict);
        assert_eq!(config.snippets_dir, Some(PathBuf::from("./snippets")));
        assert_eq!(
            config.mapping_request().endpoint(),
            "/logs,metrics/_mapping/event"
        );

        let http = config.http_client_config();
        assert_eq!(http.base_url, "https://search.example.com:9243");
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.max_retries, 1);
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_parse_auth_api_key() {
        let yaml = r#"
type: api_key
value: "VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw=="
"#;

        let auth: AuthDefinition = serde_yaml::from_str(yaml).unwrap();
        match AuthConfig::from(auth) {
            AuthConfig::ApiKey { value } => assert!(value.starts_with("VnVh")),
            other => panic!("Expected ApiKey auth, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_from_settings() {
        let config = load_config_from_str(
            "url: http://localhost:9200\nhttp:\n  requests_per_second: 25\n",
        )
        .unwrap();

        let http = config.http_client_config();
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::per_second(25)));
        assert_eq!(http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_url() {
        let err = load_config_from_str("indices: [logs]").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_invalid_url() {
        let err = load_config_from_str("url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = load_config_from_str("url: ftp://localhost:9200").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_invalid_values() {
        let err = load_config_from_str("url: http://localhost:9200\nindices: ['']").unwrap_err();
        assert!(err.to_string().contains("indices"));

        let err = load_config_from_str("url: http://localhost:9200\nhttp:\n  timeout_secs: 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_unknown_auth_type() {
        let err = load_config_from_str("url: http://localhost:9200\nauth:\n  type: kerberos\n")
            .unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://localhost:9200").unwrap();
        writeln!(file, "auth:\n  type: bearer\n  token: abc").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.auth_config(),
            AuthConfig::Bearer {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
