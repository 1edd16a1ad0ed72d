//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::load_config;
use crate::error::{Result, ResultExt};
use crate::mapping::{
    fetch_type_mappings, parse_mapping_response, ClusterClient, MappingNode, MappingRequest,
    MappingSource,
};
use crate::schema::{SchemaBuilder, SchemaDocument, SnippetRegistry};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One generated schema, tagged with the index and type it describes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEntry {
    /// Index name, when known
    pub index: Option<String>,
    /// Mapping type name, `None` for typeless mappings
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// The generated document
    pub schema: SchemaDocument,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                mapping,
                sample,
                index,
                type_name,
            } => self.infer(
                mapping,
                sample.as_deref(),
                index.as_deref(),
                type_name.as_deref(),
            ),
            Commands::Fetch {
                config,
                index,
                type_name,
                no_sample,
            } => self.fetch(config, index, type_name, *no_sample).await,
            Commands::Snippets => self.snippets(),
        }
    }

    /// Build schemas offline from files
    fn infer(
        &self,
        mapping_path: &Path,
        sample_path: Option<&Path>,
        index: Option<&str>,
        type_name: Option<&str>,
    ) -> Result<()> {
        let mapping = read_json(mapping_path)?;
        let sample = sample_path.map(read_json).transpose()?;

        let registry = load_snippets(self.cli.snippets_dir.as_deref())?;
        let builder =
            SchemaBuilder::with_snippets(registry.as_ref().unwrap_or(SnippetRegistry::builtin()));

        let entries = infer_schemas(
            &builder,
            &mapping,
            sample.as_ref(),
            index,
            type_name,
            self.cli.strict,
        )?;
        self.output_entries(&entries);
        Ok(())
    }

    /// Fetch mappings from a cluster and build schemas
    async fn fetch(
        &self,
        config_path: &Path,
        indices: &[String],
        types: &[String],
        no_sample: bool,
    ) -> Result<()> {
        let mut config = load_config(config_path)?;
        if !indices.is_empty() {
            config.indices = indices.to_vec();
        }
        if !types.is_empty() {
            config.types = types.to_vec();
        }

        let snippets_dir = self
            .cli
            .snippets_dir
            .as_deref()
            .or(config.snippets_dir.as_deref());
        let registry = load_snippets(snippets_dir)?;
        let builder =
            SchemaBuilder::with_snippets(registry.as_ref().unwrap_or(SnippetRegistry::builtin()));

        let client = ClusterClient::new(config.http_client_config(), config.auth_config())?;
        info!(
            "Reverse-engineering mappings from {} (auth: {})",
            config.cluster_url()?.origin().ascii_serialization(),
            config.auth_config().scheme()
        );

        let entries = fetch_schemas(
            &client,
            &config.mapping_request(),
            &builder,
            config.sample && !no_sample,
            self.cli.strict || config.strict,
        )
        .await?;
        self.output_entries(&entries);
        Ok(())
    }

    /// List registered geometry snippets
    fn snippets(&self) -> Result<()> {
        let registry = load_snippets(self.cli.snippets_dir.as_deref())?;
        let registry = registry.as_ref().unwrap_or(SnippetRegistry::builtin());

        for key in registry.keys() {
            if let Some(snippet) = registry.get(key) {
                self.output_message(&json!({
                    "key": key,
                    "name": snippet.name,
                    "parentType": snippet.parent_type,
                    "fields": snippet.properties.len()
                }));
            }
        }
        Ok(())
    }

    fn output_entries(&self, entries: &[SchemaEntry]) {
        if entries.is_empty() {
            warn!("No mappings matched, nothing to output");
        }
        for entry in entries {
            println!("{}", render_entry(entry, self.cli.format));
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Build schemas from a mapping document.
///
/// `mapping` is either a get-mapping response, filtered by `index` and
/// `type_name` when given, or a bare `{properties: ...}` type mapping that
/// `index` and `type_name` then name. The sample document applies to every
/// resulting entry.
pub fn infer_schemas(
    builder: &SchemaBuilder<'_>,
    mapping: &Value,
    sample: Option<&Value>,
    index: Option<&str>,
    type_name: Option<&str>,
    strict: bool,
) -> Result<Vec<SchemaEntry>> {
    if is_type_mapping(mapping) {
        let node = MappingNode::from_value(mapping)?;
        return Ok(vec![SchemaEntry {
            index: index.map(str::to_string),
            type_name: type_name.map(str::to_string),
            schema: build(builder, &node, sample, strict)?,
        }]);
    }

    parse_mapping_response(mapping)?
        .into_iter()
        .filter(|m| index.map_or(true, |i| m.index == i))
        .filter(|m| type_name.map_or(true, |t| m.type_name.as_deref() == Some(t)))
        .map(|m| -> Result<SchemaEntry> {
            Ok(SchemaEntry {
                schema: build(builder, &m.mapping, sample, strict)?,
                index: Some(m.index),
                type_name: m.type_name,
            })
        })
        .collect()
}

/// Fetch the mappings of a request and build one schema per index/type,
/// each refined by a sample document of its own when `with_sample` is set.
pub async fn fetch_schemas(
    source: &dyn MappingSource,
    request: &MappingRequest,
    builder: &SchemaBuilder<'_>,
    with_sample: bool,
    strict: bool,
) -> Result<Vec<SchemaEntry>> {
    let mappings = fetch_type_mappings(source, request).await?;
    info!("Fetched {} type mapping(s)", mappings.len());

    let mut entries = Vec::with_capacity(mappings.len());
    for mapping in mappings {
        let sample = if with_sample {
            source
                .fetch_sample(&mapping.index, mapping.type_name.as_deref())
                .await?
        } else {
            None
        };

        if with_sample && sample.is_none() {
            debug!("No sample document in '{}', using mapping only", mapping.index);
        }

        entries.push(SchemaEntry {
            schema: build(builder, &mapping.mapping, sample.as_ref(), strict)?,
            index: Some(mapping.index),
            type_name: mapping.type_name,
        });
    }

    Ok(entries)
}

/// Render an entry in the requested output format
pub fn render_entry(entry: &SchemaEntry, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(entry).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(entry).unwrap_or_default(),
    }
}

fn build(
    builder: &SchemaBuilder<'_>,
    mapping: &MappingNode,
    sample: Option<&Value>,
    strict: bool,
) -> Result<SchemaDocument> {
    if strict {
        builder.build_checked(mapping, sample)
    } else {
        Ok(builder.build(mapping, sample))
    }
}

/// A bare type mapping has `properties` at its root
fn is_type_mapping(mapping: &Value) -> bool {
    mapping.get("properties").is_some_and(Value::is_object)
}

fn load_snippets(dir: Option<&Path>) -> Result<Option<SnippetRegistry>> {
    dir.map(SnippetRegistry::from_dir).transpose()
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}
