//! Geo-point and geo-shape subtype resolution
//!
//! Both resolvers look at a single sample value and name the representation
//! it uses. The name doubles as the key of the geometry snippet expanded for
//! the field later on.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// "lat,lon" pair of decimal numbers, e.g. "40.7,-74.0" or "40,-74"
static LAT_LON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(?:\.\d+)?,-?\d+(?:\.\d+)?$").unwrap()
});

/// Well-known-text keywords in match order, with the subtype each maps to.
///
/// POINT is tried before MULTIPOINT; the prefixes never collide because a
/// match needs the keyword at the very start.
const WKT_KEYWORDS: [(&str, &str); 8] = [
    ("POINT", "point"),
    ("LINESTRING", "linestring"),
    ("POLYGON", "polygon"),
    ("MULTIPOINT", "multipoint"),
    ("MULTILINESTRING", "multilinestring"),
    ("MULTIPOLYGON", "multipolygon"),
    ("GEOMETRYCOLLECTION", "geometrycollection"),
    ("BBOX", "envelope"),
];

/// Subtype used for geo-point samples that match nothing more specific
pub const DEFAULT_POINT_SUBTYPE: &str = "object";

/// Subtype used for geo-shape samples that match nothing more specific
pub const DEFAULT_SHAPE_SUBTYPE: &str = "point";

/// Resolve the representation of a geo-point sample
pub fn resolve_point_subtype(sample: Option<&Value>) -> String {
    let subtype = match sample {
        Some(Value::String(s)) if LAT_LON_REGEX.is_match(s) => "string",
        Some(Value::String(_)) => "geohash",
        Some(Value::Array(_)) => "geoJSON",
        Some(Value::Object(map))
            if map.contains_key("top_left") && map.contains_key("bottom_right") =>
        {
            "geo-bounding"
        }
        _ => DEFAULT_POINT_SUBTYPE,
    };
    subtype.to_string()
}

/// Resolve the representation of a geo-shape sample.
///
/// Objects carrying a `type` member pass that value through without checking
/// it against the snippet registry; only ASCII case is folded so GeoJSON
/// names ("Polygon") line up with snippet keys.
pub fn resolve_shape_subtype(sample: Option<&Value>) -> String {
    match sample {
        Some(Value::String(s)) => {
            wkt_subtype(s).map_or_else(|| DEFAULT_SHAPE_SUBTYPE.to_string(), str::to_string)
        }
        Some(Value::Object(map)) => match map.get("type") {
            Some(Value::String(t)) if !t.is_empty() => t.to_ascii_lowercase(),
            _ => DEFAULT_SHAPE_SUBTYPE.to_string(),
        },
        _ => DEFAULT_SHAPE_SUBTYPE.to_string(),
    }
}

/// Match a WKT string against the known keywords.
///
/// The keyword must be followed by at least one more character, so a bare
/// "POINT" does not count.
fn wkt_subtype(text: &str) -> Option<&'static str> {
    let text = text.trim();

    WKT_KEYWORDS.iter().find_map(|(keyword, subtype)| {
        let prefix = text.get(..keyword.len())?;
        let rest = &text[keyword.len()..];
        (prefix.eq_ignore_ascii_case(keyword) && !rest.trim_start().is_empty()).then_some(*subtype)
    })
}
