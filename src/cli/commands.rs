//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reverse-engineer JSON Schemas from search-cluster mappings
#[derive(Parser, Debug)]
#[command(name = "elastic-reverse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fail when part of a schema could not be inferred
    #[arg(long, global = true)]
    pub strict: bool,

    /// Directory of geometry snippets overriding the built-ins
    #[arg(long, global = true)]
    pub snippets_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build schemas from a mapping file
    Infer {
        /// Get-mapping response, or a single `{properties: ...}` type mapping (JSON)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Sample document (JSON) with `_index`, `_type`, `_id`, `_source`
        #[arg(short, long)]
        sample: Option<PathBuf>,

        /// Only this index (names the index of a bare type mapping)
        #[arg(long)]
        index: Option<String>,

        /// Only this mapping type (names the type of a bare type mapping)
        #[arg(long = "type")]
        type_name: Option<String>,
    },

    /// Fetch mappings from a cluster and build schemas
    Fetch {
        /// Run configuration file (YAML)
        #[arg(short = 'C', long)]
        config: PathBuf,

        /// Indices to cover, replacing the configured ones
        #[arg(long)]
        index: Vec<String>,

        /// Mapping types to cover, replacing the configured ones
        #[arg(long = "type")]
        type_name: Vec<String>,

        /// Skip fetching sample documents
        #[arg(long)]
        no_sample: bool,
    },

    /// List registered geometry snippets
    Snippets,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one schema per line)
    Json,
    /// Human-readable output
    Pretty,
}
