//! Structured error model for the decoding core.
//!
//! Every payload-shaped failure (a raw string that does not conform to its
//! style's grammar, or does not parse as its leaf type) surfaces as a
//! [`ParseError`]. Spec-shaped failures (an unsupported style/explode
//! combination for a location) surface as plain [`DecodeError::Spec`]
//! strings instead, since the fault is in the parameter descriptor, not the
//! payload. Programmer faults (a non-primitive schema handed to the
//! primitive parser, an empty content-type registered with [`crate::registry`])
//! are not represented here at all — they panic, since the caller, not the
//! request, is at fault.

use std::fmt;

/// The six payload-fault kinds a [`ParseError`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catchall for failures that don't fit the other kinds.
    Other,
    /// No body decoder is registered for the given content type.
    UnsupportedFormat,
    /// Raw serialization does not conform to the style's grammar.
    InvalidFormat,
    /// An `integer`-typed leaf failed to parse.
    InvalidInt,
    /// A `number`-typed leaf failed to parse.
    InvalidNumber,
    /// A `boolean`-typed leaf failed to parse.
    InvalidBool,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Other => "other",
            ErrorKind::UnsupportedFormat => "unsupported_format",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::InvalidInt => "invalid_int",
            ErrorKind::InvalidNumber => "invalid_number",
            ErrorKind::InvalidBool => "invalid_bool",
        };
        f.write_str(s)
    }
}

/// One segment of a [`ParseError`]'s path: a property name or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Property(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Property(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A structured decoding failure.
///
/// Rendering concatenates the present attributes in the order
/// `path -> value -> reason -> cause`, separated by `": "`; missing
/// attributes are omitted. `cause` nests an inner `ParseError`, preserving
/// the innermost one for programmatic inspection via [`ParseError::root_cause`].
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub path: Vec<PathSegment>,
    pub value: Option<String>,
    pub reason: String,
    pub cause: Option<Box<ParseError>>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        ParseError {
            kind,
            path: Vec::new(),
            value: None,
            reason: reason.into(),
            cause: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_cause(mut self, cause: ParseError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Prepend one positional segment (property name or array index) and
    /// re-raise, keeping the original error reachable as `cause`. This is
    /// how [`crate::composite`] builders attribute a leaf failure to its
    /// place in the containing array or object.
    pub fn wrap(segment: PathSegment, inner: ParseError) -> Self {
        let mut path = Vec::with_capacity(inner.path.len() + 1);
        path.push(segment);
        path.extend(inner.path.clone());
        ParseError {
            kind: inner.kind,
            path,
            value: inner.value.clone(),
            reason: inner.reason.clone(),
            cause: Some(Box::new(inner)),
        }
    }

    /// Walk the `cause` chain to the innermost error.
    pub fn root_cause(&self) -> &ParseError {
        match &self.cause {
            Some(inner) => inner.root_cause(),
            None => self,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.path.is_empty() {
            let joined = self
                .path
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("/");
            parts.push(joined);
        }
        if let Some(value) = &self.value {
            parts.push(value.clone());
        }
        parts.push(self.reason.clone());
        if let Some(cause) = &self.cause {
            // A `wrap()`'d error copies its cause's value/reason onto itself
            // so callers can read them without walking the chain; skip
            // re-printing the cause in that case and only surface it when it
            // carries information this error's own fields don't already show.
            let redundant =
                cause.path.is_empty() && cause.value == self.value && cause.reason == self.reason;
            if !redundant {
                parts.push(cause.to_string());
            }
        }
        f.write_str(&parts.join(": "))
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn std::error::Error + 'static))
    }
}

/// The outer result type decoders return.
///
/// `Parse` carries a payload fault (see [`ParseError`]); `Spec` carries a
/// fault in the parameter descriptor itself (an unsupported style/explode
/// combination for its location) and names the location, parameter name,
/// style and explode flag in its message, per spec.
#[derive(Debug, Clone)]
pub enum DecodeError {
    Parse(ParseError),
    Spec(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Parse(e) => e.fmt(f),
            DecodeError::Spec(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(e) => Some(e),
            DecodeError::Spec(_) => None,
        }
    }
}

impl From<ParseError> for DecodeError {
    fn from(e: ParseError) -> Self {
        DecodeError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_missing_attributes() {
        let e = ParseError::new(ErrorKind::InvalidFormat, "a value must be prefixed with .");
        assert_eq!(e.to_string(), "a value must be prefixed with .");
    }

    #[test]
    fn display_includes_path_value_reason() {
        let e = ParseError::new(ErrorKind::InvalidInt, "an invalid integer").with_value("oops");
        let wrapped = ParseError::wrap(PathSegment::Index(1), e);
        assert_eq!(wrapped.to_string(), "1: oops: an invalid integer");
    }

    #[test]
    fn display_shows_cause_when_it_adds_information() {
        let cause = ParseError::new(ErrorKind::Other, "unexpected character at offset 3");
        let outer = ParseError::new(ErrorKind::InvalidFormat, "failed to decode request body")
            .with_cause(cause);
        assert_eq!(
            outer.to_string(),
            "failed to decode request body: unexpected character at offset 3"
        );
    }

    #[test]
    fn root_cause_reaches_innermost() {
        let inner = ParseError::new(ErrorKind::InvalidBool, "an invalid boolean").with_value("nope");
        let outer = ParseError::wrap(PathSegment::Property("flag".into()), inner.clone());
        assert_eq!(outer.root_cause().reason, inner.reason);
        assert_eq!(outer.root_cause().value, inner.value);
    }

    #[test]
    fn wrap_accumulates_multiple_segments() {
        let leaf = ParseError::new(ErrorKind::InvalidNumber, "an invalid number").with_value("x");
        let once = ParseError::wrap(PathSegment::Index(2), leaf);
        let twice = ParseError::wrap(PathSegment::Property("items".into()), once);
        assert_eq!(twice.path, vec![PathSegment::Property("items".into()), PathSegment::Index(2)]);
    }
}
