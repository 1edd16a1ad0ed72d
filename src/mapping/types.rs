//! Mapping types

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field definition from an index mapping.
///
/// Deserializes straight from the engine's JSON. Parameters other than
/// `type`, `properties` and `fields` (boost, format, store, ...) are kept in
/// `params` in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingNode {
    /// Declared field type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    /// Child field definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, MappingNode>>,

    /// Multi-field definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,

    /// Remaining mapping parameters
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl MappingNode {
    /// Create a field of the given type
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    /// Create a type mapping (or object field) from child definitions
    pub fn with_properties(properties: IndexMap<String, MappingNode>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// Parse from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Set a mapping parameter
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Look up a mapping parameter
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Look up a child field
    pub fn field(&self, name: &str) -> Option<&MappingNode> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }
}

/// The mapping of one index (and, on engines that still have them, one type)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    /// Index name
    pub index: String,
    /// Mapping type name, `None` for typeless mappings
    pub type_name: Option<String>,
    /// Root of the mapping (`{properties: {...}}`)
    pub mapping: MappingNode,
}
