//! # oas_param_core
//!
//! A standalone decoding core for OpenAPI 3 parameter and request-body
//! values: given a parameter's location, style, explode flag, and schema,
//! turn the raw strings a transport handed you into typed values, or a
//! structured error describing exactly what went wrong and where.
//!
//! ## Architecture
//!
//! - **[`error`]** - the `ParseError`/`DecodeError` structured error model
//! - **[`schema`]** - closed enums for location/style/shape plus the
//!   `ParameterDescriptor` schema-as-JSON representation
//! - **[`primitive`]** - leaf value parsing (string/integer/number/boolean)
//! - **[`splitter`]** - `key=value` property splitting shared by the
//!   object decoders
//! - **[`composite`]** - array/object construction against a JSON Schema
//! - **[`request`]** - the `RequestView` trait transport adapters implement
//! - **[`decode`]** - one decoder module per parameter location
//! - **[`dispatch`]** - routes a `ParameterDescriptor` to its decoder
//! - **[`registry`]** - the process-wide request body decoder registry

pub mod composite;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod primitive;
pub mod registry;
pub mod request;
pub mod schema;
pub mod splitter;

pub use dispatch::decode;
pub use error::{DecodeError, ErrorKind, ParseError, PathSegment};
pub use registry::{global as global_registry, BodyDecoder, BodyDecoderRegistry};
pub use request::{MapRequestView, RequestView};
pub use schema::{
    default_serialization_method, DecodedValue, ParameterDescriptor, ParameterLocation, ParameterStyle, Shape,
};
