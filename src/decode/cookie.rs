//! Cookie location decoder (C5.4). Only `form` is a valid style for
//! cookie parameters, and `explode=true` is not expressible for cookies
//! (there is no way to repeat a cookie name) — arrays and objects require
//! `explode=false`.

use crate::composite::{build_array, build_object};
use crate::error::DecodeError;
use crate::primitive::parse_primitive;
use crate::request::RequestView;
use crate::schema::{schema_items, schema_properties, DecodedValue, ParameterDescriptor, ParameterStyle};
use serde_json::Value;

fn unsupported(param: &ParameterDescriptor) -> DecodeError {
    DecodeError::Spec(format!(
        "unsupported serialization method for cookie parameter '{}': style={:?} explode={}",
        param.name, param.style, param.explode
    ))
}

pub fn decode_primitive(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    if param.style != ParameterStyle::Form {
        return Err(unsupported(param));
    }
    match req.cookie(&param.name) {
        None => Ok(DecodedValue::Null),
        Some(raw) => Ok(parse_primitive(raw, &param.schema)?),
    }
}

pub fn decode_array(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    if param.style != ParameterStyle::Form || param.explode {
        return Err(unsupported(param));
    }
    let raw = match req.cookie(&param.name) {
        None => return Ok(DecodedValue::Null),
        Some(raw) => raw,
    };
    let raw_items: Vec<String> = raw.split(',').map(str::to_string).collect();
    let empty_schema = Value::Null;
    let items_schema = schema_items(&param.schema).unwrap_or(&empty_schema);
    Ok(build_array(&raw_items, items_schema)?)
}

pub fn decode_object(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    if param.style != ParameterStyle::Form || param.explode {
        return Err(unsupported(param));
    }
    let raw = match req.cookie(&param.name) {
        None => return Ok(DecodedValue::Null),
        Some(raw) => raw,
    };
    let flat = crate::splitter::split_properties(raw, ",", ",")?;
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

    fn descriptor(name: &str, schema: Value, explode: bool) -> ParameterDescriptor {
        ParameterDescriptor::new(name, ParameterLocation::Cookie, schema, ParameterStyle::Form, explode)
    }

    #[test]
    fn missing_cookie_is_null() {
        let param = descriptor("id", json!({"type": "string"}), false);
        let req = MapRequestView::new();
        assert_eq!(decode_primitive(&param, &req).unwrap(), DecodedValue::Null);
    }

    #[test]
    fn array_of_strings_splits_on_comma() {
        let param = descriptor("id", json!({"type": "array", "items": {"type": "string"}}), false);
        let req = MapRequestView::new().with_cookie("id", "a,b,c");
        assert_eq!(
            decode_array(&param, &req).unwrap(),
            DecodedValue::Array(vec![
                DecodedValue::String("a".into()),
                DecodedValue::String("b".into()),
                DecodedValue::String("c".into())
            ])
        );
    }

    #[test]
    fn exploded_array_is_unsupported() {
        let param = descriptor("id", json!({"type": "array", "items": {"type": "string"}}), true);
        let req = MapRequestView::new().with_cookie("id", "a,b,c");
        assert!(matches!(decode_array(&param, &req), Err(DecodeError::Spec(_))));
    }

    #[test]
    fn non_form_style_is_unsupported() {
        let param = ParameterDescriptor::new(
            "id",
            ParameterLocation::Cookie,
            json!({"type": "string"}),
            ParameterStyle::Simple,
            false,
        );
        let req = MapRequestView::new().with_cookie("id", "x");
        assert!(matches!(decode_primitive(&param, &req), Err(DecodeError::Spec(_))));
    }
}
