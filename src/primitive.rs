//! Primitive parser (C2): turns one raw string into a typed leaf value per
//! a leaf schema's declared type.

use crate::error::{ErrorKind, ParseError};
use crate::schema::{schema_type, DecodedValue};
use serde_json::Value;

const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

/// Parse `s` against `schema`'s declared type.
///
/// An empty `s` always yields `Ok(DecodedValue::Null)`, regardless of type.
/// `integer` and `number` both parse as a 64-bit float — this is the
/// spec's own contract (not a bug to be silently fixed): `"3.5"` succeeds
/// for an `integer` schema, since the core defers strict integer
/// validation to downstream schema validation.
///
/// # Panics
///
/// Panics if `schema`'s `type` is anything other than `integer`, `number`,
/// `boolean`, or `string` (including `array`/`object`, or no `type` at
/// all other than the implicit string fallback) — handing a composite
/// schema to the primitive parser is a programmer error, not a payload
/// fault.
pub fn parse_primitive(s: &str, schema: &Value) -> Result<DecodedValue, ParseError> {
    if s.is_empty() {
        return Ok(DecodedValue::Null);
    }

    match schema_type(schema) {
        Some("integer") => s
            .parse::<f64>()
            .map(DecodedValue::Number)
            .map_err(|_| ParseError::new(ErrorKind::InvalidInt, "an invalid integer").with_value(s)),
        Some("number") => s
            .parse::<f64>()
            .map(DecodedValue::Number)
            .map_err(|_| ParseError::new(ErrorKind::InvalidNumber, "an invalid number").with_value(s)),
        Some("boolean") => {
            if TRUE_LITERALS.contains(&s) {
                Ok(DecodedValue::Bool(true))
            } else if FALSE_LITERALS.contains(&s) {
                Ok(DecodedValue::Bool(false))
            } else {
                Err(ParseError::new(ErrorKind::InvalidBool, "an invalid boolean").with_value(s))
            }
        }
        Some("string") | None => Ok(DecodedValue::String(s.to_string())),
        Some(other) => panic!(
            "parse_primitive called with non-primitive schema type '{other}'; \
             composite schemas must go through the object/array builders"
        ),
    }
}
