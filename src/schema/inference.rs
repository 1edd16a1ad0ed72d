//! Schema inference from mappings and sample documents

use super::decorator::decorate;
use super::diagnostics::{CollectingLogger, Diagnostic, DiagnosticLogger, TracingLogger};
use super::mapper::{map_type, SourceType};
use super::snippets::SnippetRegistry;
use super::types::{SchemaDocument, SchemaNode, SchemaType};
use crate::error::{Error, Result};
use crate::mapping::MappingNode;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Engine-level envelope fields present on every document
pub const SERVICE_FIELDS: [&str; 4] = ["_index", "_type", "_id", "_source"];

/// Schema builder: the per-call context for one or more inference runs.
///
/// Holds the snippet registry and the diagnostic logger. Nothing is shared
/// between calls except these read-only collaborators.
#[derive(Clone)]
pub struct SchemaBuilder<'a> {
    snippets: &'a SnippetRegistry,
    logger: Arc<dyn DiagnosticLogger>,
}

impl Default for SchemaBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder<'static> {
    /// Create a builder over the built-in snippets, logging through `tracing`
    pub fn new() -> Self {
        Self::with_snippets(SnippetRegistry::builtin())
    }
}

impl<'a> SchemaBuilder<'a> {
    /// Create a builder over a custom snippet registry
    pub fn with_snippets(snippets: &'a SnippetRegistry) -> Self {
        Self {
            snippets,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the diagnostic logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn DiagnosticLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the diagnostic logger in place
    pub fn set_logger(&mut self, logger: Arc<dyn DiagnosticLogger>) {
        self.logger = logger;
    }

    /// The snippet registry in use
    pub fn snippets(&self) -> &SnippetRegistry {
        self.snippets
    }

    /// Build the schema for one type mapping, refined by an optional sample
    /// document (`{_index, _type, _id, _source, ...}`).
    pub fn build(&self, mapping: &MappingNode, sample: Option<&Value>) -> SchemaDocument {
        self.build_with(mapping, sample, self.logger.as_ref())
    }

    /// Like [`build`](Self::build), but fails when any part of the schema was
    /// degraded. The diagnostics are still forwarded to the logger.
    pub fn build_checked(
        &self,
        mapping: &MappingNode,
        sample: Option<&Value>,
    ) -> Result<SchemaDocument> {
        let collector = CollectingLogger::new();
        let tee = Tee {
            collector: &collector,
            inner: self.logger.as_ref(),
        };

        let document = self.build_with(mapping, sample, &tee);
        let diagnostics = collector.take();

        if diagnostics.is_empty() {
            Ok(document)
        } else {
            let message = diagnostics
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(Error::schema_inference(message))
        }
    }

    fn build_with(
        &self,
        mapping: &MappingNode,
        sample: Option<&Value>,
        logger: &dyn DiagnosticLogger,
    ) -> SchemaDocument {
        let walker = Walker {
            snippets: self.snippets,
            logger,
        };

        let mut document = SchemaDocument::new();
        document.properties = service_fields(sample);

        let source_sample = sample.and_then(|s| s.get("_source"));
        let fields = walker.fields(mapping.properties.as_ref(), source_sample, "_source");
        if let Some(source) = document.properties.get_mut("_source") {
            source.set_properties(fields);
        }

        document
    }
}

impl std::fmt::Debug for SchemaBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("snippets", &self.snippets.len())
            .finish_non_exhaustive()
    }
}

/// Build a schema with the built-in snippets (convenience function)
pub fn build_schema(mapping: &MappingNode, sample: Option<&Value>) -> SchemaDocument {
    SchemaBuilder::new().build(mapping, sample)
}

/// The four service fields, plus every other top-level key of the sample
/// inferred from its value alone.
fn service_fields(sample: Option<&Value>) -> IndexMap<String, SchemaNode> {
    let mut properties = IndexMap::new();
    for name in ["_index", "_type", "_id"] {
        properties.insert(
            name.to_string(),
            SchemaNode::with_mode(SchemaType::String, "text"),
        );
    }
    properties.insert("_source".to_string(), SchemaNode::object(IndexMap::new()));

    if let Some(Value::Object(document)) = sample {
        for (key, value) in document {
            if SERVICE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            properties.insert(key.clone(), map_type(None, Some(value), value.is_object()));
        }
    }

    properties
}

/// Depth-first walk over one mapping tree and its aligned sample
struct Walker<'w> {
    snippets: &'w SnippetRegistry,
    logger: &'w dyn DiagnosticLogger,
}

impl Walker<'_> {
    fn fields(
        &self,
        properties: Option<&IndexMap<String, MappingNode>>,
        sample: Option<&Value>,
        parent_path: &str,
    ) -> IndexMap<String, SchemaNode> {
        let Some(properties) = properties else {
            return IndexMap::new();
        };
        // Children only line up with a sample that is itself a record
        let record = sample.and_then(Value::as_object);

        properties
            .iter()
            .map(|(name, field)| {
                let path = format!("{parent_path}.{name}");
                let field_sample = record.and_then(|r| r.get(name));
                (name.clone(), self.field(field, field_sample, &path))
            })
            .collect()
    }

    fn field(&self, field: &MappingNode, sample: Option<&Value>, path: &str) -> SchemaNode {
        let has_children = field.properties.is_some();
        let type_name = field.field_type.as_deref();

        if let Some(name) = type_name {
            if !name.is_empty() && name != "object" && SourceType::parse(name).is_none() {
                self.logger.log(&Diagnostic::UnrecognizedSourceType {
                    path: path.to_string(),
                    type_name: name.to_string(),
                });
            }
        }

        let mut node = map_type(type_name, sample, has_children);

        if has_children {
            let children = self.fields(field.properties.as_ref(), sample, path);
            if node.is_array_shaped() {
                node.set_items(vec![SchemaNode::object(children)]);
            } else {
                node.set_properties(children);
            }
        }

        // Declared scalars observed as lists keep their declared type as the item
        if matches!(sample, Some(Value::Array(_))) && !node.is_array_shaped() {
            node = SchemaNode::array(vec![node]);
        }

        if node.node_type.is_some_and(SchemaType::is_geo) {
            if let Some(sub_type) = node.sub_type.as_deref() {
                if !self.snippets.contains(sub_type) {
                    self.logger.log(&Diagnostic::UnknownSubType {
                        path: path.to_string(),
                        sub_type: sub_type.to_string(),
                    });
                }
            }
            node = self.snippets.expand(node);
        }

        if node.is_undetermined() {
            self.logger.log(&Diagnostic::UndeterminedType {
                path: path.to_string(),
            });
        }

        debug!(
            path,
            node_type = node.node_type.map_or("unknown", SchemaType::as_str),
            mode = node.mode.as_deref().unwrap_or(""),
            "Mapped field"
        );

        decorate(node, field)
    }
}

/// Forwards to an inner logger while collecting
struct Tee<'t> {
    collector: &'t CollectingLogger,
    inner: &'t dyn DiagnosticLogger,
}

impl DiagnosticLogger for Tee<'_> {
    fn log(&self, diagnostic: &Diagnostic) {
        self.collector.log(diagnostic);
        self.inner.log(diagnostic);
    }
}
