//! Path location decoder (C5.1).
//!
//! Path template engines preserve the leading punctuation in the captured
//! slice, so the storage key under which a raw path segment was recorded
//! carries the style's prefix: plain `name` for `simple`, `.name` for
//! `label`, `;name` for `matrix`.

use crate::composite::{build_array, build_object};
use crate::error::{DecodeError, ErrorKind, ParseError};
use crate::primitive::parse_primitive;
use crate::schema::{schema_items, schema_properties, ParameterDescriptor, ParameterStyle, Shape};
use crate::splitter::split_properties;
use crate::schema::DecodedValue;
use serde_json::Value;
use tracing::debug;

/// The storage key a path-template extractor would record a parameter's
/// raw segment under.
pub fn storage_key(param: &ParameterDescriptor) -> String {
    match param.style {
        ParameterStyle::Label => format!(".{}", param.name),
        ParameterStyle::Matrix => format!(";{}", param.name),
        _ => param.name.clone(),
    }
}

struct PathDelims {
    prefix: String,
    item_delim: Option<String>,
    value_delim: Option<String>,
}

fn path_delims(
    name: &str,
    style: ParameterStyle,
    shape: Shape,
    explode: bool,
) -> Result<PathDelims, DecodeError> {
    use ParameterStyle::*;
    use Shape::*;
    match (style, shape) {
        (Simple, Primitive) => Ok(PathDelims { prefix: String::new(), item_delim: None, value_delim: None }),
        (Label, Primitive) => Ok(PathDelims { prefix: ".".into(), item_delim: None, value_delim: None }),
        (Matrix, Primitive) => Ok(PathDelims { prefix: format!(";{name}="), item_delim: None, value_delim: None }),
        (Simple, Array) => Ok(PathDelims { prefix: String::new(), item_delim: Some(",".into()), value_delim: None }),
        (Label, Array) => Ok(PathDelims {
            prefix: ".".into(),
            item_delim: Some(if explode { ".".into() } else { ",".into() }),
            value_delim: None,
        }),
        (Matrix, Array) => Ok(PathDelims {
            prefix: format!(";{name}="),
            item_delim: Some(if explode { format!(";{name}=") } else { ",".into() }),
            value_delim: None,
        }),
        (Simple, Object) => Ok(PathDelims {
            prefix: String::new(),
            item_delim: Some(",".into()),
            value_delim: Some(if explode { "=".into() } else { ",".into() }),
        }),
        (Label, Object) => Ok(PathDelims {
            prefix: ".".into(),
            item_delim: Some(if explode { ".".into() } else { ",".into() }),
            value_delim: Some(if explode { "=".into() } else { ",".into() }),
        }),
        (Matrix, Object) => {
            if explode {
                Ok(PathDelims { prefix: ";".into(), item_delim: Some(";".into()), value_delim: Some("=".into()) })
            } else {
                Ok(PathDelims {
                    prefix: format!(";{name}="),
                    item_delim: Some(",".into()),
                    value_delim: Some(",".into()),
                })
            }
        }
        (other, _) => Err(DecodeError::Spec(format!(
            "unsupported serialization method for path parameter '{name}': style={other:?} explode={explode}"
        ))),
    }
}

fn strip_required_prefix<'a>(raw: &'a str, prefix: &str) -> Result<&'a str, DecodeError> {
    if prefix.is_empty() {
        return Ok(raw);
    }
    raw.strip_prefix(prefix).ok_or_else(|| {
        DecodeError::Parse(
            ParseError::new(ErrorKind::InvalidFormat, format!("a value must be prefixed with {prefix}"))
                .with_value(raw),
        )
    })
}

pub fn decode_primitive(param: &ParameterDescriptor, req: &dyn crate::request::RequestView) -> Result<DecodedValue, DecodeError> {
    let key = storage_key(param);
    debug!(parameter = %param.name, location = "path", storage_key = %key, "decoding primitive");
    let raw = match req.path_param(&key) {
        Some(r) => r,
        None => return Ok(DecodedValue::Null),
    };
    let delims = path_delims(&param.name, param.style, Shape::Primitive, param.explode)?;
    let body = strip_required_prefix(raw, &delims.prefix)?;
    Ok(parse_primitive(body, &param.schema)?)
}

pub fn decode_array(param: &ParameterDescriptor, req: &dyn crate::request::RequestView) -> Result<DecodedValue, DecodeError> {
    let key = storage_key(param);
    let raw = match req.path_param(&key) {
        Some(r) => r,
        None => return Ok(DecodedValue::Null),
    };
    let delims = path_delims(&param.name, param.style, Shape::Array, param.explode)?;
    let body = strip_required_prefix(raw, &delims.prefix)?;
    let item_delim = delims.item_delim.unwrap_or_else(|| unreachable!("array delims always define an item delimiter"));
    let raw_items: Vec<String> = if body.is_empty() {
        Vec::new()
    } else {
        body.split(item_delim.as_str()).map(str::to_string).collect()
    };
    let empty_schema = Value::Null;
    let items_schema = schema_items(&param.schema).unwrap_or(&empty_schema);
    Ok(build_array(&raw_items, items_schema)?)
}

pub fn decode_object(param: &ParameterDescriptor, req: &dyn crate::request::RequestView) -> Result<DecodedValue, DecodeError> {
    let key = storage_key(param);
    let raw = match req.path_param(&key) {
        Some(r) => r,
        None => return Ok(DecodedValue::Null),
    };
    let delims = path_delims(&param.name, param.style, Shape::Object, param.explode)?;
    let body = strip_required_prefix(raw, &delims.prefix)?;
    let item_delim = delims.item_delim.unwrap_or_else(|| unreachable!("object delims always define an item delimiter"));
    let value_delim = delims.value_delim.unwrap_or_else(|| unreachable!("object delims always define a value delimiter"));
    let flat = split_properties(body, &item_delim, &value_delim)?;
    let empty_props = serde_json::Map::new();
    let props = schema_properties(&param.schema).unwrap_or(&empty_props);
    Ok(build_object(&flat, props)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MapRequestView;
    use crate::schema::ParameterLocation;
    use serde_json::json;

    fn descriptor(name: &str, schema: Value, style: ParameterStyle, explode: bool) -> ParameterDescriptor {
        ParameterDescriptor::new(name, ParameterLocation::Path, schema, style, explode)
    }

    #[test]
    fn absent_parameter_is_null() {
        let param = descriptor("id", json!({"type": "string"}), ParameterStyle::Simple, false);
        let req = MapRequestView::new();
        assert_eq!(decode_primitive(&param, &req).unwrap(), DecodedValue::Null);
    }

    #[test]
    fn matrix_exploded_array_of_integers() {
        let param = descriptor("id", json!({"type": "array", "items": {"type": "integer"}}), ParameterStyle::Matrix, true);
        let req = MapRequestView::new().with_path_param(";id", ";id=3;id=4;id=5");
        let v = decode_array(&param, &req).unwrap();
        assert_eq!(
            v,
            DecodedValue::Array(vec![DecodedValue::Number(3.0), DecodedValue::Number(4.0), DecodedValue::Number(5.0)])
        );
    }

    #[test]
    fn label_non_exploded_object() {
        let schema = json!({"type": "object", "properties": {"role": {"type": "string"}, "n": {"type": "integer"}}});
        let param = descriptor("id", schema, ParameterStyle::Label, false);
        let req = MapRequestView::new().with_path_param(".id", ".role,admin,n,7");
        let v = decode_object(&param, &req).unwrap();
        match v {
            DecodedValue::Object(map) => {
                assert_eq!(map.get("role"), Some(&DecodedValue::String("admin".into())));
                assert_eq!(map.get("n"), Some(&DecodedValue::Number(7.0)));
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn error_propagation_reports_index_path() {
        let param = descriptor("id", json!({"type": "array", "items": {"type": "integer"}}), ParameterStyle::Matrix, true);
        let req = MapRequestView::new().with_path_param(";id", ";id=3;id=oops;id=5");
        let err = decode_array(&param, &req).unwrap_err();
        match err {
            DecodeError::Parse(e) => {
                assert_eq!(e.kind, ErrorKind::InvalidInt);
                assert_eq!(e.path, vec![crate::error::PathSegment::Index(1)]);
                assert_eq!(e.value.as_deref(), Some("oops"));
            }
            DecodeError::Spec(_) => panic!("expected a ParseError"),
        }
    }

    #[test]
    fn missing_prefix_is_invalid_format() {
        let param = descriptor("id", json!({"type": "string"}), ParameterStyle::Label, false);
        let req = MapRequestView::new().with_path_param(".id", "foo");
        let err = decode_primitive(&param, &req).unwrap_err();
        match err {
            DecodeError::Parse(e) => {
                assert_eq!(e.kind, ErrorKind::InvalidFormat);
                assert_eq!(e.value.as_deref(), Some("foo"));
            }
            DecodeError::Spec(_) => panic!("expected a ParseError"),
        }
    }

    #[test]
    fn unsupported_style_is_a_spec_error_not_a_parse_error() {
        let param = descriptor("id", json!({"type": "string"}), ParameterStyle::DeepObject, false);
        let req = MapRequestView::new().with_path_param("id", "x");
        let err = decode_primitive(&param, &req).unwrap_err();
        assert!(matches!(err, DecodeError::Spec(_)));
    }
}
