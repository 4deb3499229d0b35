//! The data model: parameter descriptors, schema-node helpers, and the
//! decoded-value union. Grounded in `spec/types.rs`'s `ParameterMeta` and
//! `server/request.rs`'s `decode_param_value`, which both keep the schema as
//! a plain `serde_json::Value` rather than a custom typed tree — this core
//! does the same, since it never recurses past one array/object level.

use serde_json::Value;
use std::collections::HashMap;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        };
        f.write_str(s)
    }
}

/// An OpenAPI 3 parameter serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterStyle {
    Simple,
    Label,
    Matrix,
    Form,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

/// The shape the schema dictates for a parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Primitive,
    Array,
    Object,
}

/// Read `schema.type` as a string, if present.
pub fn schema_type(schema: &Value) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

/// Read `schema.items`, if present.
pub fn schema_items(schema: &Value) -> Option<&Value> {
    schema.get("items")
}

/// Read `schema.properties`, if present.
pub fn schema_properties(schema: &Value) -> Option<&serde_json::Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

/// The shape a schema node dictates: `array` and `object` are composite,
/// everything else (including an absent or untyped schema) is treated as
/// primitive and handed to [`crate::primitive::parse_primitive`].
pub fn shape_of(schema: &Value) -> Shape {
    match schema_type(schema) {
        Some("array") => Shape::Array,
        Some("object") => Shape::Object,
        _ => Shape::Primitive,
    }
}

/// A read-only description of one OpenAPI parameter: name, location, schema,
/// and its serialization method (style, explode).
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParameterLocation,
    pub schema: Value,
    pub style: ParameterStyle,
    pub explode: bool,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        schema: Value,
        style: ParameterStyle,
        explode: bool,
    ) -> Self {
        ParameterDescriptor {
            name: name.into(),
            location,
            schema,
            style,
            explode,
        }
    }

    /// Build a descriptor using the default serialization method for its
    /// location (path -> simple/false, query -> form/true, header ->
    /// simple/false, cookie -> form/true).
    pub fn defaulted(name: impl Into<String>, location: ParameterLocation, schema: Value) -> Self {
        let (style, explode) = default_serialization_method(location);
        ParameterDescriptor::new(name, location, schema, style, explode)
    }
}

/// The default (style, explode) pair for a location.
pub fn default_serialization_method(location: ParameterLocation) -> (ParameterStyle, bool) {
    match location {
        ParameterLocation::Path => (ParameterStyle::Simple, false),
        ParameterLocation::Query => (ParameterStyle::Form, true),
        ParameterLocation::Header => (ParameterStyle::Simple, false),
        ParameterLocation::Cookie => (ParameterStyle::Form, true),
    }
}

/// A decoded parameter or body value: `null`, a primitive, an ordered
/// sequence of primitives, or an unordered name -> primitive mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Null,
    Number(f64),
    Bool(bool),
    String(String),
    Array(Vec<DecodedValue>),
    Object(HashMap<String, DecodedValue>),
}

impl From<Value> for DecodedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DecodedValue::Null,
            Value::Bool(b) => DecodedValue::Bool(b),
            Value::Number(n) => DecodedValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => DecodedValue::String(s),
            Value::Array(items) => DecodedValue::Array(items.into_iter().map(DecodedValue::from).collect()),
            Value::Object(map) => {
                DecodedValue::Object(map.into_iter().map(|(k, v)| (k, DecodedValue::from(v))).collect())
            }
        }
    }
}
