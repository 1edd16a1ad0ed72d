//! Source type to schema type mapping

use super::geo::{resolve_point_subtype, resolve_shape_subtype};
use super::types::{SchemaNode, SchemaType};
use serde_json::Value;

/// Field type names the engine declares in its mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    HalfFloat,
    ScaledFloat,
    Keyword,
    Text,
    IntegerRange,
    FloatRange,
    LongRange,
    DoubleRange,
    DateRange,
    Null,
    Boolean,
    Binary,
    Nested,
    Date,
    GeoPoint,
    GeoShape,
}

impl SourceType {
    /// Every known source type, in lookup-table order
    pub const ALL: [SourceType; 22] = [
        SourceType::Long,
        SourceType::Integer,
        SourceType::Short,
        SourceType::Byte,
        SourceType::Double,
        SourceType::Float,
        SourceType::HalfFloat,
        SourceType::ScaledFloat,
        SourceType::Keyword,
        SourceType::Text,
        SourceType::IntegerRange,
        SourceType::FloatRange,
        SourceType::LongRange,
        SourceType::DoubleRange,
        SourceType::DateRange,
        SourceType::Null,
        SourceType::Boolean,
        SourceType::Binary,
        SourceType::Nested,
        SourceType::Date,
        SourceType::GeoPoint,
        SourceType::GeoShape,
    ];

    /// Parse a declared type name. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The engine's name for this type
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Long => "long",
            SourceType::Integer => "integer",
            SourceType::Short => "short",
            SourceType::Byte => "byte",
            SourceType::Double => "double",
            SourceType::Float => "float",
            SourceType::HalfFloat => "half_float",
            SourceType::ScaledFloat => "scaled_float",
            SourceType::Keyword => "keyword",
            SourceType::Text => "text",
            SourceType::IntegerRange => "integer_range",
            SourceType::FloatRange => "float_range",
            SourceType::LongRange => "long_range",
            SourceType::DoubleRange => "double_range",
            SourceType::DateRange => "date_range",
            SourceType::Null => "null",
            SourceType::Boolean => "boolean",
            SourceType::Binary => "binary",
            SourceType::Nested => "nested",
            SourceType::Date => "date",
            SourceType::GeoPoint => "geo_point",
            SourceType::GeoShape => "geo_shape",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared type name (or, without one, a sample value) to a base node.
///
/// The returned node has no children; the walker attaches those.
pub fn map_type(
    type_name: Option<&str>,
    sample: Option<&Value>,
    has_nested_definition: bool,
) -> SchemaNode {
    match type_name.and_then(SourceType::parse) {
        Some(source) => map_source_type(source, sample),
        None => infer_from_sample(sample, has_nested_definition),
    }
}

/// Map a known source type
pub fn map_source_type(source: SourceType, sample: Option<&Value>) -> SchemaNode {
    match source {
        SourceType::Long
        | SourceType::Integer
        | SourceType::Short
        | SourceType::Byte
        | SourceType::Double
        | SourceType::Float
        | SourceType::HalfFloat
        | SourceType::ScaledFloat => SchemaNode::with_mode(SchemaType::Number, source.as_str()),

        SourceType::Keyword | SourceType::Text => {
            SchemaNode::with_mode(SchemaType::String, source.as_str())
        }

        SourceType::IntegerRange
        | SourceType::FloatRange
        | SourceType::LongRange
        | SourceType::DoubleRange
        | SourceType::DateRange => SchemaNode::with_mode(SchemaType::Range, source.as_str()),

        SourceType::Null => SchemaNode::new(SchemaType::Null),
        SourceType::Boolean => SchemaNode::new(SchemaType::Boolean),
        SourceType::Binary => SchemaNode::new(SchemaType::Binary),
        SourceType::Nested => SchemaNode::new(SchemaType::Nested),
        SourceType::Date => SchemaNode::new(SchemaType::Date),

        SourceType::GeoPoint => {
            SchemaNode::new(SchemaType::GeoPoint).with_sub_type(resolve_point_subtype(sample))
        }
        SourceType::GeoShape => {
            SchemaNode::new(SchemaType::GeoShape).with_sub_type(resolve_shape_subtype(sample))
        }
    }
}

/// Infer a base node from a sample value alone.
///
/// With no sample the node is an object when the field has child
/// definitions, otherwise it is left undetermined.
pub fn infer_from_sample(sample: Option<&Value>, has_nested_definition: bool) -> SchemaNode {
    match sample {
        Some(Value::String(_)) => SchemaNode::with_mode(SchemaType::String, "text"),
        Some(Value::Number(n)) => {
            SchemaNode::with_mode(SchemaType::Number, number_mode(n.as_f64().unwrap_or_default()))
        }
        Some(Value::Array(_)) => SchemaNode::new(SchemaType::Array),
        Some(Value::Bool(_)) => SchemaNode::new(SchemaType::Boolean),
        Some(Value::Object(_)) => SchemaNode::new(SchemaType::Object),
        Some(Value::Null) => SchemaNode::new(SchemaType::Null),
        None if has_nested_definition => SchemaNode::new(SchemaType::Object),
        None => SchemaNode::default(),
    }
}

/// Pick the narrowest numeric mode for a sample number.
///
/// Whole numbers are classified by range, with the upper bound inclusive
/// and the lower bound exclusive: 127 is a "byte" but -128 a "short", and
/// both 2147483648 and -2147483648 are "long". Anything with a fractional
/// part is a "float".
#[allow(clippy::float_cmp)]
pub fn number_mode(value: f64) -> &'static str {
    const BYTE: f64 = 127.0;
    const SHORT: f64 = 32_767.0;
    const INT: f64 = 2_147_483_647.0;

    if value - value.trunc() != 0.0 {
        return "float";
    }

    if value > -(BYTE + 1.0) && value <= BYTE {
        "byte"
    } else if value > -(SHORT + 1.0) && value <= SHORT {
        "short"
    } else if value > -(INT + 1.0) && value <= INT {
        "integer"
    } else {
        "long"
    }
}
