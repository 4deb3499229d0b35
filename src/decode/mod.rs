//! Location decoders (C5): one module per parameter location, each
//! implementing `decode_primitive`/`decode_array`/`decode_object` against
//! the `RequestView` contract.

pub mod cookie;
pub mod header;
pub mod path;
pub mod query;
