// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # elastic-reverse
//!
//! Reverse-engineers draft-04 JSON Schema documents from search index
//! mappings, optionally refined by one sample document per index/type.
//!
//! ## Features
//!
//! - **Type Mapping**: Declared mapping types become schema types with a precision `mode`
//! - **Sample Inference**: Undeclared fields are typed from the sample value
//! - **Geo Expansion**: geo-point / geo-shape values expand into their concrete shape
//! - **Property Decoration**: Mapping parameters (boost, format, store, ...) carry over
//! - **Live Fetch**: Mappings and sample documents straight from a cluster
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use elastic_reverse::mapping::MappingNode;
//! use elastic_reverse::schema::build_schema;
//!
//! let mapping = MappingNode::from_value(&json!({
//!     "properties": {
//!         "title": { "type": "text" },
//!         "loc": { "type": "geo_point" }
//!     }
//! }))?;
//! let sample = json!({ "_id": "1", "_source": { "loc": "40,-74" } });
//!
//! let schema = build_schema(&mapping, Some(&sample));
//! println!("{}", schema.to_json_pretty());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                  CLI  (infer / fetch / snippets)              │
//! └───────────────────────────────────────────────────────────────┘
//!                │                                │
//! ┌──────────────┴──────────────┐   ┌─────────────┴───────────────┐
//! │          mapping            │   │           schema            │
//! ├─────────────────────────────┤   ├─────────────────────────────┤
//! │ MappingNode / responses     │   │ Type Mapper   Geo resolvers │
//! │ MappingRequest              │──▶│ Field Walker  Snippets      │
//! │ MappingSource (cluster)     │   │ Decorator     Diagnostics   │
//! └─────────────────────────────┘   └─────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────┐
//! │ http (retry, rate limit)    │
//! │ auth (basic/bearer/api key) │
//! └─────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Cluster request authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Index mappings and the cluster fetch collaborator
pub mod mapping;

/// Schema inference from mappings and sample documents
pub mod schema;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, Config};
pub use mapping::{MappingNode, MappingRequest, MappingSource, TypeMapping};
pub use schema::{build_schema, SchemaBuilder, SchemaDocument, SchemaNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
