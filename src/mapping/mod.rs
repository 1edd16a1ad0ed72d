//! Mapping module
//!
//! Index mapping input: the field definition tree, get-mapping response
//! parsing, and the collaborator that fetches mappings from a live cluster.
//!
//! # Overview
//!
//! - `MappingNode` - One field definition (type, children, parameters)
//! - `MappingRequest` - Indices/types to fetch, built per run
//! - `MappingSource` - Fetch collaborator; `ClusterClient` is the HTTP one

mod request;
mod response;
mod source;
mod types;

pub use request::MappingRequest;
pub use response::parse_mapping_response;
pub use source::{fetch_type_mappings, ClusterClient, MappingSource};
pub use types::{MappingNode, TypeMapping};

#[cfg(test)]
mod tests;
