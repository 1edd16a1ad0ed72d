//! Get-mapping response parsing
//!
//! Two layouts are accepted:
//!
//! ```text
//! typed     { "<index>": { "mappings": { "<type>": { "properties": {...} } } } }
//! typeless  { "<index>": { "mappings": { "properties": {...} } } }
//! ```

use super::types::{MappingNode, TypeMapping};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Split a get-mapping response into one entry per index/type, in response order
pub fn parse_mapping_response(response: &Value) -> Result<Vec<TypeMapping>> {
    let indices = response
        .as_object()
        .ok_or_else(|| Error::mapping("expected an object keyed by index name"))?;

    let mut result = Vec::new();
    for (index, body) in indices {
        let mappings = body
            .get("mappings")
            .ok_or_else(|| Error::mapping(format!("index '{index}' has no 'mappings'")))?
            .as_object()
            .ok_or_else(|| Error::mapping(format!("'mappings' of index '{index}' is not an object")))?;

        if mappings.is_empty() {
            continue;
        }

        if is_typeless(mappings) {
            result.push(TypeMapping {
                index: index.clone(),
                type_name: None,
                mapping: MappingNode::from_value(&Value::Object(mappings.clone()))?,
            });
            continue;
        }

        for (type_name, type_mapping) in mappings {
            result.push(TypeMapping {
                index: index.clone(),
                type_name: Some(type_name.clone()),
                mapping: MappingNode::from_value(type_mapping)?,
            });
        }
    }

    Ok(result)
}

/// Typeless mappings carry `properties` (or scalar settings such as
/// `"dynamic": "strict"`) directly under `mappings`.
fn is_typeless(mappings: &Map<String, Value>) -> bool {
    mappings.contains_key("properties") || mappings.values().any(|v| !v.is_object())
}

