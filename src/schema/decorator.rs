//! Validation property decoration
//!
//! Copies a closed allow-list of mapping parameters (boost, store, format,
//! ...) from the source field onto the generated node. Which parameters are
//! allowed depends on the node's type family; parameters the source does not
//! declare are omitted, never defaulted.

use super::types::{SchemaNode, SchemaType};
use crate::mapping::MappingNode;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

const STRING_PROPERTIES: &[&str] = &[
    "boost",
    "eager_global_ordinals",
    "index",
    "index_options",
    "norms",
    "store",
    "similarity",
    "ignore_above",
    "doc_values",
    "include_in_all",
    "null_value",
];

const NUMBER_PROPERTIES: &[&str] = &[
    "coerce",
    "boost",
    "doc_values",
    "ignore_malformed",
    "index",
    "null_value",
    "store",
    "scaling_factor",
];

const DATE_PROPERTIES: &[&str] = &[
    "boost",
    "doc_values",
    "format",
    "locale",
    "ignore_malformed",
    "index",
    "null_value",
    "store",
];

const BOOLEAN_PROPERTIES: &[&str] = &["boost", "doc_values", "index", "null_value", "store"];

const BINARY_PROPERTIES: &[&str] = &["doc_values", "store"];

const RANGE_PROPERTIES: &[&str] = &["coerce", "boost", "index", "store"];

/// Key the multi-field blob is stored under
pub const STRING_FIELDS_KEY: &str = "stringfields";

/// Allow-listed parameter names for a node type
pub fn allowed_properties(node_type: SchemaType) -> &'static [&'static str] {
    match node_type {
        SchemaType::String => STRING_PROPERTIES,
        SchemaType::Number => NUMBER_PROPERTIES,
        SchemaType::Date => DATE_PROPERTIES,
        SchemaType::Boolean => BOOLEAN_PROPERTIES,
        SchemaType::Binary => BINARY_PROPERTIES,
        SchemaType::Range => RANGE_PROPERTIES,
        SchemaType::Null
        | SchemaType::Object
        | SchemaType::Nested
        | SchemaType::Array
        | SchemaType::GeoPoint
        | SchemaType::GeoShape => &[],
    }
}

/// Copy the allowed parameters of `field` onto `node`
pub fn decorate(mut node: SchemaNode, field: &MappingNode) -> SchemaNode {
    let Some(node_type) = node.node_type else {
        return node;
    };

    for &name in allowed_properties(node_type) {
        if let Some(value) = field.param(name) {
            node.validation.insert(name.to_string(), value.clone());
        }
    }

    if node_type == SchemaType::String {
        if let Some(fields) = &field.fields {
            node.string_fields = Some(to_indented_json(fields));
        }
    }

    node
}

/// Pretty-print with four-space indentation
fn to_indented_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));

    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}
