//! Schema inference module
//!
//! Translates an index mapping, optionally refined by one sample document,
//! into a draft-04 JSON Schema document.
//!
//! # Features
//!
//! - **Type Mapping**: Maps declared mapping types to schema types and modes
//! - **Sample Inference**: Falls back to the sample value when no type is declared
//! - **Geo Subtypes**: Detects the representation of geo-point / geo-shape values
//! - **Snippet Expansion**: Expands static geometry templates for geo fields
//! - **Property Decoration**: Carries mapping parameters (boost, format, ...) over
//!
//! # Example
//!
//! ```rust,ignore
//! use elastic_reverse::schema::build_schema;
//!
//! let mapping = serde_json::from_value(json!({
//!     "properties": { "loc": { "type": "geo_point" } }
//! }))?;
//! let sample = json!({ "_source": { "loc": "40,-74" } });
//!
//! let schema = build_schema(&mapping, Some(&sample));
//! ```

mod decorator;
mod diagnostics;
mod geo;
mod inference;
mod mapper;
mod snippets;
mod types;

pub use decorator::{allowed_properties, decorate, STRING_FIELDS_KEY};
pub use diagnostics::{CollectingLogger, Diagnostic, DiagnosticLogger, NoopLogger, TracingLogger};
pub use geo::{
    resolve_point_subtype, resolve_shape_subtype, DEFAULT_POINT_SUBTYPE, DEFAULT_SHAPE_SUBTYPE,
};
pub use inference::{build_schema, SchemaBuilder, SERVICE_FIELDS};
pub use mapper::{infer_from_sample, map_source_type, map_type, number_mode, SourceType};
pub use snippets::{GeometrySnippet, ParentType, SnippetField, SnippetRegistry};
pub use types::{SchemaDocument, SchemaNode, SchemaType, DRAFT_04};
