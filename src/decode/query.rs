//! Query location decoder (C5.2).

use crate::composite::build_array;
use crate::error::{DecodeError, ParseError, PathSegment};
use crate::primitive::parse_primitive;
use crate::request::RequestView;
use crate::schema::{schema_items, schema_properties, DecodedValue, ParameterDescriptor, ParameterStyle};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

fn unsupported(param: &ParameterDescriptor) -> DecodeError {
    DecodeError::Spec(format!(
        "unsupported serialization method for query parameter '{}': style={:?} explode={}",
        param.name, param.style, param.explode
    ))
}

pub fn decode_primitive(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    if param.style != ParameterStyle::Form {
        return Err(unsupported(param));
    }
    debug!(parameter = %param.name, location = "query", "decoding primitive");
    match req.first_query_value(&param.name) {
        None => Ok(DecodedValue::Null),
        Some(raw) => Ok(parse_primitive(raw, &param.schema)?),
    }
}

pub fn decode_array(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    if param.style == ParameterStyle::DeepObject {
        return Err(unsupported(param));
    }
    let matches = req.all_query_values(&param.name);
    if matches.is_empty() {
        return Ok(DecodedValue::Null);
    }
    let raw_items: Vec<String> = if param.explode {
        matches.into_iter().map(str::to_string).collect()
    } else {
        let delim = match param.style {
            ParameterStyle::SpaceDelimited => " ",
            ParameterStyle::PipeDelimited => "|",
            _ => ",",
        };
        matches[0].split(delim).map(str::to_string).collect()
    };
    let empty_schema = Value::Null;
    let items_schema = schema_items(&param.schema).unwrap_or(&empty_schema);
    Ok(build_array(&raw_items, items_schema)?)
}

pub fn decode_object(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    match param.style {
        ParameterStyle::Form if param.explode => Ok(decode_flat_query_object(param, req)?),
        ParameterStyle::Form => {
            let first = match req.first_query_value(&param.name) {
                Some(v) => v,
                None => return Ok(DecodedValue::Null),
            };
            let flat = crate::splitter::split_properties(first, ",", ",")?;
            let empty_props = serde_json::Map::new();
            let props = schema_properties(&param.schema).unwrap_or(&empty_props);
            Ok(crate::composite::build_object(&flat, props)?)
        }
        ParameterStyle::DeepObject => Ok(decode_deep_object(param, req)?),
        _ => Err(unsupported(param)),
    }
}

/// `form`/`explode=true`: the whole query is a flat `{key -> firstValue}`
/// mapping. Property names come from *all* query keys, not only
/// `schema.properties` — keys the schema does declare are coerced through
/// the leaf parser, others are carried through as raw strings since
/// there's no leaf schema to validate them against.
fn decode_flat_query_object(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, ParseError> {
    let mut seen = std::collections::HashSet::new();
    let mut out = HashMap::new();
    let props = schema_properties(&param.schema);
    for (key, value) in req.query_params() {
        if !seen.insert(key.clone()) {
            continue;
        }
        let decoded = coerce_keyed_value(key, value, props)?;
        out.insert(key.clone(), decoded);
    }
    if out.is_empty() {
        Ok(DecodedValue::Null)
    } else {
        Ok(DecodedValue::Object(out))
    }
}

fn decode_deep_object(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, ParseError> {
    let pattern = format!(r"^{}\[(.+?)\]$", regex::escape(&param.name));
    let re = Regex::new(&pattern).unwrap_or_else(|e| {
        panic!("invalid deepObject pattern for parameter '{}': {e}", param.name)
    });
    let mut seen = std::collections::HashSet::new();
    let mut raw = HashMap::new();
    for (key, value) in req.query_params() {
        if let Some(caps) = re.captures(key) {
            let prop = caps[1].to_string();
            if seen.insert(prop.clone()) {
                raw.insert(prop, value.clone());
            }
        }
    }
    if raw.is_empty() {
        return Ok(DecodedValue::Null);
    }
    let props = schema_properties(&param.schema);
    let mut out = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let decoded = coerce_keyed_value(&key, &value, props)?;
        out.insert(key, decoded);
    }
    Ok(DecodedValue::Object(out))
}

fn coerce_keyed_value(
    key: &str,
    value: &str,
    props: Option<&serde_json::Map<String, Value>>,
) -> Result<DecodedValue, ParseError> {
    match props.and_then(|p| p.get(key)) {
        Some(child_schema) => parse_primitive(value, child_schema)
            .map_err(|e| ParseError::wrap(PathSegment::Property(key.to_string()), e)),
        None => Ok(DecodedValue::String(value.to_string())),
    }
}
