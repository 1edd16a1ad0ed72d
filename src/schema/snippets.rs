//! Geometry snippet templates
//!
//! A snippet describes the nested shape one geo representation takes in a
//! document (a GeoJSON pair, a WKT polygon, a bounding box, ...). The 14
//! built-in snippets ship inside the binary and are parsed once; a directory
//! of replacement files can be layered on top at startup.

use super::types::{SchemaNode, SchemaType};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Built-in snippets: (subtype key, file name, contents)
const BUILTIN_SNIPPETS: [(&str, &str, &str); 14] = [
    (
        "geoJSON",
        "geopoint-geojson.json",
        include_str!("../../snippets/geopoint-geojson.json"),
    ),
    (
        "geo-bounding",
        "geopoint-geo-bounding.json",
        include_str!("../../snippets/geopoint-geo-bounding.json"),
    ),
    (
        "string",
        "geopoint-string.json",
        include_str!("../../snippets/geopoint-string.json"),
    ),
    (
        "geohash",
        "geopoint-geohash.json",
        include_str!("../../snippets/geopoint-geohash.json"),
    ),
    (
        "object",
        "geopoint-object.json",
        include_str!("../../snippets/geopoint-object.json"),
    ),
    (
        "envelope",
        "geoshape-envelope.json",
        include_str!("../../snippets/geoshape-envelope.json"),
    ),
    (
        "linestring",
        "geoshape-linestring.json",
        include_str!("../../snippets/geoshape-linestring.json"),
    ),
    (
        "multipoint",
        "geoshape-multipoint.json",
        include_str!("../../snippets/geoshape-multipoint.json"),
    ),
    (
        "point",
        "geoshape-point.json",
        include_str!("../../snippets/geoshape-point.json"),
    ),
    (
        "circle",
        "geoshape-circle.json",
        include_str!("../../snippets/geoshape-circle.json"),
    ),
    (
        "geometrycollection",
        "geoshape-geometrycollection.json",
        include_str!("../../snippets/geoshape-geometrycollection.json"),
    ),
    (
        "multilinestring",
        "geoshape-multilinestring.json",
        include_str!("../../snippets/geoshape-multilinestring.json"),
    ),
    (
        "multipolygon",
        "geoshape-multipolygon.json",
        include_str!("../../snippets/geoshape-multipolygon.json"),
    ),
    (
        "polygon",
        "geoshape-polygon.json",
        include_str!("../../snippets/geoshape-polygon.json"),
    ),
];

static BUILTIN_REGISTRY: Lazy<SnippetRegistry> = Lazy::new(|| {
    let sources = BUILTIN_SNIPPETS
        .iter()
        .map(|(key, _, contents)| (*key, *contents));

    SnippetRegistry::from_sources(sources).unwrap_or_else(|e| {
        error!("Built-in geometry snippets failed to load, geo fields will not expand: {e}");
        SnippetRegistry::default()
    })
});

/// Root container of a snippet's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    /// Children are positional item templates
    Array,
    /// Children are named properties
    #[default]
    Object,
}

/// One static geo representation template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySnippet {
    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Whether the root expands to `items` or `properties`
    #[serde(default)]
    pub parent_type: ParentType,

    /// Child templates
    #[serde(default)]
    pub properties: Vec<SnippetField>,
}

/// Child template inside a snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetField {
    /// Field name (positional children may omit it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Field type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<SchemaType>,

    /// Container override for this field's own children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<ParentType>,

    /// Nested child templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<SnippetField>>,

    /// Literal example value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>,
}

impl SnippetField {
    /// Children of arrays are positional
    fn holds_items(&self) -> bool {
        self.field_type == Some(SchemaType::Array) || self.parent_type == Some(ParentType::Array)
    }

    fn to_schema(&self) -> SchemaNode {
        let mut node = SchemaNode {
            node_type: self.field_type,
            ..SchemaNode::default()
        };

        if let Some(children) = &self.properties {
            if self.holds_items() {
                node.set_items(positional(children));
            } else {
                node.set_properties(named(children));
            }
        }

        node.sample.clone_from(&self.sample);
        node
    }
}

fn positional(fields: &[SnippetField]) -> Vec<SchemaNode> {
    fields.iter().map(SnippetField::to_schema).collect()
}

fn named(fields: &[SnippetField]) -> IndexMap<String, SchemaNode> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let name = field.name.clone().unwrap_or_else(|| i.to_string());
            (name, field.to_schema())
        })
        .collect()
}

/// Registry of geometry snippets keyed by subtype
#[derive(Debug, Clone, Default)]
pub struct SnippetRegistry {
    snippets: IndexMap<String, GeometrySnippet>,
}

impl SnippetRegistry {
    /// The process-wide registry of built-in snippets
    pub fn builtin() -> &'static SnippetRegistry {
        &BUILTIN_REGISTRY
    }

    /// Parse snippets from (key, JSON text) pairs
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut registry = Self::default();
        for (key, contents) in sources {
            let snippet: GeometrySnippet = serde_json::from_str(contents)
                .map_err(|e| Error::snippet(key, e.to_string()))?;
            registry.insert(key, snippet);
        }
        Ok(registry)
    }

    /// Load the built-ins, replacing any whose file exists in `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::FileNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut registry = Self::builtin().clone();
        for (key, file_name, _) in BUILTIN_SNIPPETS {
            let path = dir.join(file_name);
            if !path.is_file() {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            let snippet: GeometrySnippet = serde_json::from_str(&contents)
                .map_err(|e| Error::snippet(key, format!("{}: {e}", path.display())))?;
            debug!("Loaded geometry snippet '{}' from {}", key, path.display());
            registry.insert(key, snippet);
        }
        Ok(registry)
    }

    /// Register or replace a snippet
    pub fn insert(&mut self, key: impl Into<String>, snippet: GeometrySnippet) {
        self.snippets.insert(key.into(), snippet);
    }

    /// Look up a snippet by subtype key
    pub fn get(&self, key: &str) -> Option<&GeometrySnippet> {
        self.snippets.get(key)
    }

    /// Check if a subtype key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.snippets.contains_key(key)
    }

    /// Registered subtype keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.snippets.keys().map(String::as_str)
    }

    /// Number of registered snippets
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Expand the snippet named by the node's `subType` into its children.
    ///
    /// A missing or unregistered subtype leaves the node as it is.
    pub fn expand(&self, mut node: SchemaNode) -> SchemaNode {
        let Some(snippet) = node.sub_type.as_deref().and_then(|key| self.get(key)) else {
            return node;
        };

        match snippet.parent_type {
            ParentType::Array => node.set_items(positional(&snippet.properties)),
            ParentType::Object => node.set_properties(named(&snippet.properties)),
        }
        node
    }
}
