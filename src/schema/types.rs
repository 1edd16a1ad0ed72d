//! Schema types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema draft the generated documents declare
pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Target schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaType {
    Number,
    String,
    Boolean,
    Date,
    Binary,
    Null,
    Object,
    Nested,
    Array,
    Range,
    GeoPoint,
    GeoShape,
}

impl SchemaType {
    /// Types whose children are attached as a one-element `items` template.
    ///
    /// Geo types belong here even when they describe a single object, because
    /// the engine may hand back either a scalar or a list for them.
    pub fn is_array_shaped(self) -> bool {
        matches!(
            self,
            SchemaType::Nested | SchemaType::Array | SchemaType::GeoPoint | SchemaType::GeoShape
        )
    }

    /// Check if this is a geo-point or geo-shape type
    pub fn is_geo(self) -> bool {
        matches!(self, SchemaType::GeoPoint | SchemaType::GeoShape)
    }

    /// Serialized name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Boolean => "boolean",
            SchemaType::Date => "date",
            SchemaType::Binary => "binary",
            SchemaType::Null => "null",
            SchemaType::Object => "object",
            SchemaType::Nested => "nested",
            SchemaType::Array => "array",
            SchemaType::Range => "range",
            SchemaType::GeoPoint => "geo-point",
            SchemaType::GeoShape => "geo-shape",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the generated schema tree.
///
/// A node carries either `properties` or `items`, never both. The setters
/// below keep that invariant; `sub_type` is only ever set on geo nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Node type, `None` when it could not be determined
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<SchemaType>,

    /// Precision or subtype hint (e.g. "keyword", "scaled_float", "date_range")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Geo representation key (e.g. "geohash", "polygon")
    #[serde(rename = "subType", default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,

    /// Named children of record-shaped nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    /// Positional children of array-shaped nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SchemaNode>>,

    /// Literal example value carried over from a geometry snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>,

    /// Multi-field definition kept as an opaque JSON blob
    #[serde(rename = "stringfields", default, skip_serializing_if = "Option::is_none")]
    pub string_fields: Option<String>,

    /// Validation properties copied from the source field definition
    #[serde(flatten)]
    pub validation: IndexMap<String, Value>,
}

impl SchemaNode {
    /// Create a node of the given type
    pub fn new(node_type: SchemaType) -> Self {
        Self {
            node_type: Some(node_type),
            ..Self::default()
        }
    }

    /// Create a node of the given type with a mode hint
    pub fn with_mode(node_type: SchemaType, mode: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type),
            mode: Some(mode.into()),
            ..Self::default()
        }
    }

    /// Create an object node with named children
    pub fn object(properties: IndexMap<String, SchemaNode>) -> Self {
        let mut node = Self::new(SchemaType::Object);
        node.set_properties(properties);
        node
    }

    /// Create an array node with positional item templates
    pub fn array(items: Vec<SchemaNode>) -> Self {
        let mut node = Self::new(SchemaType::Array);
        node.set_items(items);
        node
    }

    /// Set the geo subtype
    #[must_use]
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Attach named children, dropping any item templates
    pub fn set_properties(&mut self, properties: IndexMap<String, SchemaNode>) {
        self.items = None;
        self.properties = Some(properties);
    }

    /// Attach item templates, dropping any named children
    pub fn set_items(&mut self, items: Vec<SchemaNode>) {
        self.properties = None;
        self.items = Some(items);
    }

    /// True when the type could not be determined
    pub fn is_undetermined(&self) -> bool {
        self.node_type.is_none()
    }

    /// Check if the node type is array-shaped
    pub fn is_array_shaped(&self) -> bool {
        self.node_type.is_some_and(SchemaType::is_array_shaped)
    }

    /// Get a named child
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Get an item template by position
    pub fn get_item(&self, index: usize) -> Option<&SchemaNode> {
        self.items.as_ref().and_then(|items| items.get(index))
    }
}

/// Full draft-04 JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Schema version
    #[serde(rename = "$schema")]
    pub schema: String,

    /// Schema type (always "object" for top-level)
    #[serde(rename = "type")]
    pub json_type: SchemaType,

    /// Allow additional properties (always false)
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,

    /// Service fields plus any extra top-level sample keys
    pub properties: IndexMap<String, SchemaNode>,
}

impl Default for SchemaDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            schema: DRAFT_04.to_string(),
            json_type: SchemaType::Object,
            additional_properties: false,
            properties: IndexMap::new(),
        }
    }

    /// Get a top-level property
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Get a field under `_source`
    pub fn source_field(&self, name: &str) -> Option<&SchemaNode> {
        self.get_property("_source")
            .and_then(|source| source.get_property(name))
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
