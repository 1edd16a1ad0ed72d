//! CLI module
//!
//! Command-line interface for reverse-engineering schemas.
//!
//! # Commands
//!
//! - `infer` - Build schemas offline from a mapping file (and sample document)
//! - `fetch` - Fetch mappings (and sample documents) from a live cluster
//! - `snippets` - List the registered geometry snippets

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{fetch_schemas, infer_schemas, render_entry, Runner, SchemaEntry};
