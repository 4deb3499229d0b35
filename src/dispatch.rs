//! Dispatcher (C6): select a location decoder by `parameter.location`,
//! then select a shape (primitive/array/object) by `schema.type`.
//!
//! [`crate::schema::ParameterLocation`] is a closed Rust enum, so an
//! unrecognized location is unreachable by construction rather than a
//! runtime case to guard against: the `match` below is exhaustive.

use crate::decode::{cookie, header, path, query};
use crate::error::DecodeError;
use crate::request::RequestView;
use crate::schema::{shape_of, DecodedValue, ParameterDescriptor, ParameterLocation, Shape};
use tracing::debug;

/// Decode one parameter out of `req` according to `param`'s location,
/// schema shape, and serialization method.
pub fn decode(param: &ParameterDescriptor, req: &dyn RequestView) -> Result<DecodedValue, DecodeError> {
    let shape = shape_of(&param.schema);
    debug!(
        parameter = %param.name,
        location = %param.location,
        style = ?param.style,
        explode = param.explode,
        shape = ?shape,
        "dispatching parameter decode"
    );

    match (param.location, shape) {
        (ParameterLocation::Path, Shape::Primitive) => path::decode_primitive(param, req),
        (ParameterLocation::Path, Shape::Array) => path::decode_array(param, req),
        (ParameterLocation::Path, Shape::Object) => path::decode_object(param, req),

        (ParameterLocation::Query, Shape::Primitive) => query::decode_primitive(param, req),
        (ParameterLocation::Query, Shape::Array) => query::decode_array(param, req),
        (ParameterLocation::Query, Shape::Object) => query::decode_object(param, req),

        (ParameterLocation::Header, Shape::Primitive) => header::decode_primitive(param, req),
        (ParameterLocation::Header, Shape::Array) => header::decode_array(param, req),
        (ParameterLocation::Header, Shape::Object) => header::decode_object(param, req),

        (ParameterLocation::Cookie, Shape::Primitive) => cookie::decode_primitive(param, req),
        (ParameterLocation::Cookie, Shape::Array) => cookie::decode_array(param, req),
        (ParameterLocation::Cookie, Shape::Object) => cookie::decode_object(param, req),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MapRequestView;
    use crate::schema::{DecodedValue, ParameterStyle};
    use serde_json::json;

    #[test]
    fn routes_array_schema_to_decode_array() {
        let param = ParameterDescriptor::new(
            "id",
            ParameterLocation::Query,
            json!({"type": "array", "items": {"type": "integer"}}),
            ParameterStyle::Form,
            false,
        );
        let req = MapRequestView::new().with_query_param("id", "1,2");
        assert_eq!(
            decode(&param, &req).unwrap(),
            DecodedValue::Array(vec![DecodedValue::Number(1.0), DecodedValue::Number(2.0)])
        );
    }

    #[test]
    fn routes_untyped_schema_to_decode_primitive() {
        let param = ParameterDescriptor::defaulted("id", ParameterLocation::Header, json!({"type": "string"}));
        let req = MapRequestView::new().with_header("id", "hello");
        assert_eq!(decode(&param, &req).unwrap(), DecodedValue::String("hello".into()));
    }
}
