//! Body decoder registry (C7): a process-wide content-type -> decoder map.
//!
//! Backed by [`dashmap::DashMap`] for lock-free concurrent reads and
//! writes so registration and decoding can proceed from many threads at
//! once without a global lock. A process-wide singleton is exposed via
//! [`global`] and keeps a stable identity across calls;
//! [`BodyDecoderRegistry::new`] stays public so tests can build isolated
//! instances instead of mutating global state.

use crate::error::{DecodeError, ErrorKind, ParseError};
use crate::schema::DecodedValue;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, warn};

/// A body decoder: raw bytes in, a decoded value or a [`ParseError`] out.
pub type BodyDecoder = Arc<dyn Fn(&[u8]) -> Result<DecodedValue, ParseError> + Send + Sync>;

/// A content-type keyed registry of body decoders.
pub struct BodyDecoderRegistry {
    decoders: DashMap<String, BodyDecoder>,
}

impl Default for BodyDecoderRegistry {
    fn default() -> Self {
        BodyDecoderRegistry::new()
    }
}

impl BodyDecoderRegistry {
    /// Build a registry preseeded with `application/json`, `plain/text`,
    /// and the IANA-correct `text/plain` spelling, sharing the same
    /// decoder as `plain/text`.
    pub fn new() -> Self {
        let registry = BodyDecoderRegistry { decoders: DashMap::new() };
        registry.register("application/json", Arc::new(decode_json));
        registry.register("plain/text", Arc::new(decode_plain_text));
        registry.register("text/plain", Arc::new(decode_plain_text));
        registry
    }

    /// Register (or replace) the decoder for `content_type`.
    ///
    /// # Panics
    ///
    /// Panics if `content_type` is empty — registering a decoder under no
    /// content type at all is a programmer error, not a payload fault.
    pub fn register(&self, content_type: impl Into<String>, decoder: BodyDecoder) {
        let content_type = content_type.into();
        if content_type.is_empty() {
            panic!("cannot register a body decoder for an empty content type");
        }
        debug!(content_type = %content_type, "registering body decoder");
        self.decoders.insert(content_type, decoder);
    }

    /// Remove the decoder for `content_type`; subsequent [`decode`] calls
    /// for it fail with [`ErrorKind::UnsupportedFormat`].
    ///
    /// # Panics
    ///
    /// Panics if `content_type` is empty.
    pub fn unregister(&self, content_type: &str) {
        if content_type.is_empty() {
            panic!("cannot unregister an empty content type");
        }
        debug!(content_type = %content_type, "unregistering body decoder");
        self.decoders.remove(content_type);
    }

    /// Decode `bytes` using the decoder registered for `content_type`.
    pub fn decode(&self, bytes: &[u8], content_type: &str) -> Result<DecodedValue, DecodeError> {
        let decoder = match self.decoders.get(content_type) {
            Some(d) => d.clone(),
            None => {
                warn!(content_type = %content_type, "no body decoder registered");
                return Err(DecodeError::Parse(
                    ParseError::new(
                        ErrorKind::UnsupportedFormat,
                        format!("no body decoder registered for content type '{content_type}'"),
                    )
                    .with_value(content_type),
                ));
            }
        };
        decoder(bytes).map_err(|cause| {
            DecodeError::Parse(
                ParseError::new(ErrorKind::InvalidFormat, "failed to decode request body").with_cause(cause),
            )
        })
    }
}

fn decode_json(bytes: &[u8]) -> Result<DecodedValue, ParseError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| ParseError::new(ErrorKind::Other, e.to_string()))?;
    Ok(DecodedValue::from(value))
}

fn decode_plain_text(bytes: &[u8]) -> Result<DecodedValue, ParseError> {
    Ok(DecodedValue::String(String::from_utf8_lossy(bytes).into_owned()))
}

static GLOBAL_REGISTRY: Lazy<BodyDecoderRegistry> = Lazy::new(BodyDecoderRegistry::new);

/// The process-wide body decoder registry.
pub fn global() -> &'static BodyDecoderRegistry {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preseeded_json_decoder_works() {
        let registry = BodyDecoderRegistry::new();
        let v = registry.decode(br#"{"a":1}"#, "application/json").unwrap();
        match v {
            DecodedValue::Object(map) => assert_eq!(map.get("a"), Some(&DecodedValue::Number(1.0))),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn preseeded_plain_text_decoder_works() {
        let registry = BodyDecoderRegistry::new();
        assert_eq!(
            registry.decode(b"hello", "plain/text").unwrap(),
            DecodedValue::String("hello".into())
        );
        assert_eq!(
            registry.decode(b"hello", "text/plain").unwrap(),
            DecodedValue::String("hello".into())
        );
    }

    #[test]
    fn unsupported_content_type_is_unsupported_format() {
        let registry = BodyDecoderRegistry::new();
        let err = registry.decode(b"<xml/>", "application/xml").unwrap_err();
        match err {
            DecodeError::Parse(e) => assert_eq!(e.kind, ErrorKind::UnsupportedFormat),
            DecodeError::Spec(_) => panic!("expected a ParseError"),
        }
    }

    #[test]
    fn register_then_decode_succeeds() {
        let registry = BodyDecoderRegistry::new();
        registry.register("application/xml", Arc::new(|b: &[u8]| {
            Ok(DecodedValue::String(String::from_utf8_lossy(b).into_owned()))
        }));
        let v = registry.decode(b"<a/>", "application/xml").unwrap();
        assert_eq!(v, DecodedValue::String("<a/>".into()));
    }

    #[test]
    fn unregister_restores_absence() {
        let registry = BodyDecoderRegistry::new();
        registry.unregister("application/json");
        let err = registry.decode(b"{}", "application/json").unwrap_err();
        match err {
            DecodeError::Parse(e) => assert_eq!(e.kind, ErrorKind::UnsupportedFormat),
            DecodeError::Spec(_) => panic!("expected a ParseError"),
        }
    }

    #[test]
    fn invalid_json_body_wraps_cause() {
        let registry = BodyDecoderRegistry::new();
        let err = registry.decode(b"{not json", "application/json").unwrap_err();
        match err {
            DecodeError::Parse(e) => {
                assert_eq!(e.kind, ErrorKind::InvalidFormat);
                assert!(e.cause.is_some());
            }
            DecodeError::Spec(_) => panic!("expected a ParseError"),
        }
    }

    #[test]
    #[should_panic(expected = "empty content type")]
    fn register_empty_content_type_panics() {
        let registry = BodyDecoderRegistry::new();
        registry.register("", Arc::new(decode_plain_text));
    }

    #[test]
    fn global_registry_has_stable_identity() {
        global().register("application/vnd.test+json", Arc::new(decode_json));
        assert!(global().decode(b"1", "application/vnd.test+json").is_ok());
        global().unregister("application/vnd.test+json");
        assert!(global().decode(b"1", "application/vnd.test+json").is_err());
    }
}
