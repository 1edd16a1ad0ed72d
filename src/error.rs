//! Error types for elastic-reverse
//!
//! Schema inference itself never fails: a mapping it cannot make sense of
//! degrades the output and raises a diagnostic instead. Errors come from
//! reading configuration and files, from talking to the cluster, and from
//! mapping documents or snippet templates that are malformed as JSON
//! structures.

use thiserror::Error;

/// The main error type for elastic-reverse
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Cluster access
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success answer; `body` holds the cluster's `type: reason` when it
    /// sent an error document
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited by cluster, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Mappings and schemas
    // ============================================================================
    #[error("Invalid mapping response: {message}")]
    Mapping { message: String },

    #[error("Invalid geometry snippet '{key}': {message}")]
    Snippet { key: String, message: String },

    #[error("Schema inference degraded: {message}")]
    SchemaInference { message: String },

    // ============================================================================
    // Files
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// An inner error prefixed with what was being attempted
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    pub fn snippet(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Snippet {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn schema_inference(message: impl Into<String>) -> Self {
        Self::SchemaInference {
            message: message.into(),
        }
    }

    /// Whether a failed cluster call is worth repeating.
    ///
    /// Throttling, timeouts, refused connections and gateway-side statuses
    /// are transient. Anything the cluster answered deliberately (a missing
    /// index, a rejected credential) is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::HttpStatus { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Result type alias for elastic-reverse
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix errors with what was being attempted
pub trait ResultExt<T> {
    /// Lazily build the prefix, e.g. `Failed to read 'mapping.json'`
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
