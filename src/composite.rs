//! Composite builders (C4): walk a schema and apply the primitive parser
//! (C2) to assemble a typed array or object from already-split raw pieces.

use crate::error::{ParseError, PathSegment};
use crate::primitive::parse_primitive;
use crate::schema::DecodedValue;
use serde_json::Value;
use std::collections::HashMap;

/// Build an object from a flat `{name -> raw}` mapping and a schema's
/// `properties`. The result contains exactly the keys declared in
/// `properties` — raw keys absent from the schema are discarded, and
/// schema keys absent from the raw mapping parse against the empty string
/// (yielding `null`, per [`crate::primitive::parse_primitive`]).
pub fn build_object(
    raw: &HashMap<String, String>,
    properties: &serde_json::Map<String, Value>,
) -> Result<DecodedValue, ParseError> {
    let mut out = HashMap::with_capacity(properties.len());
    for (name, child_schema) in properties {
        let raw_value = raw.get(name).map(String::as_str).unwrap_or("");
        let decoded = parse_primitive(raw_value, child_schema)
            .map_err(|e| ParseError::wrap(PathSegment::Property(name.clone()), e))?;
        out.insert(name.clone(), decoded);
    }
    Ok(DecodedValue::Object(out))
}

/// Build an array from an ordered list of raw items and the array's
/// `items` leaf schema. The result's length always equals `raw.len()` —
/// no item is silently dropped.
pub fn build_array(raw: &[String], items_schema: &Value) -> Result<DecodedValue, ParseError> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, item) in raw.iter().enumerate() {
        let decoded = parse_primitive(item, items_schema)
            .map_err(|e| ParseError::wrap(PathSegment::Index(i), e))?;
        out.push(decoded);
    }
    Ok(DecodedValue::Array(out))
}
