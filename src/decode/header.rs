//! Header location decoder (C5.3). Only `simple` is a valid style for
//! header parameters. Lookup is case-insensitive per HTTP rules
//! (see `RequestView::header`).

use crate::composite::{build_array, build_object};
use crate::error::DecodeError;
use crate::primitive::parse_primitive;
use crate::request::RequestView;
use crate::schema::{schema_items, schema_properties, DecodedValue, ParameterDescriptor, ParameterStyle};
use serde_json::Value;

fn unsupported(param: &ParameterDescriptor) -> DecodeError {
    DecodeError::Spec(format!(
        "unsupported serialization method for header parameter '{}': style={:?} explode={}",
        param.name, param.style, param.explode
    ))
}

fn raw_header<'a>(param: &ParameterDescriptor, req: &'a dyn RequestView) -> Result<Option<&'a str>, DecodeError> {
    if param.style != ParameterStyle::Simple {
        return Err(unsupported(param));
    }
    Ok(req.header(&param.name).filter(|v| !v.is_empty()))
}

pub fn decode_primitive(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    match raw_header(param, req)? {
        None => Ok(DecodedValue::Null),
        Some(raw) => Ok(parse_primitive(raw, &param.schema)?),
    }
}

pub fn decode_array(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    let raw = match raw_header(param, req)? {
        None => return Ok(DecodedValue::Null),
        Some(raw) => raw,
    };
    let raw_items: Vec<String> = raw.split(',').map(str::to_string).collect();
    let empty_schema = Value::Null;
    let items_schema = schema_items(&param.schema).unwrap_or(&empty_schema);
    Ok(build_array(&raw_items, items_schema)?)
}

pub fn decode_object(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    let raw = match raw_header(param, req)? {
        None => return Ok(DecodedValue::Null),
        Some(raw) => raw,
    };
    let value_delim = if param.explode { "=" } else { "," };
    let flat = crate::splitter::split_properties(raw, ",", value_delim)?;
    let empty_props = serde_json::Map::new();
    let props = schema_properties(&param.schema).unwrap_or(&empty_props);
    Ok(build_object(&flat, props)?)
}
