//! Auth configuration types
//!
//! Runtime auth configuration, resolved from the config file or CLI.

use std::collections::HashMap;

/// Authentication configuration for cluster requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Cluster API key, sent as `Authorization: ApiKey <value>`
    ApiKey {
        /// Encoded `id:api_key` credential
        value: String,
    },

    /// Custom headers authentication
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Scheme name, safe for logging
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "api_key",
            Self::CustomHeaders { .. } => "custom_headers",
        }
    }
}
