//! Property splitter (C3): turns a serialized string into a flat
//! `{name -> value}` mapping given a property delimiter and a value
//! delimiter, which may be equal.

use crate::error::{ErrorKind, ParseError};
use std::collections::HashMap;

/// Split `src` into a `{name -> value}` mapping.
///
/// When `prop_delim == value_delim` (the "equal delimiters" mode), `src` is
/// split once on that delimiter and the resulting items are read in pairs
/// (name, value, name, value, ...); an odd number of items is
/// `InvalidFormat`. Otherwise (the "distinct delimiters" mode), `src` is
/// split on `prop_delim` and each resulting pair is split on `value_delim`
/// into exactly two parts; any pair that doesn't split into exactly two
/// parts is `InvalidFormat`.
///
/// An empty `src` yields an empty mapping, not an error — callers
/// typically gate on parameter absence before reaching the splitter.
pub fn split_properties(
    src: &str,
    prop_delim: &str,
    value_delim: &str,
) -> Result<HashMap<String, String>, ParseError> {
    if src.is_empty() {
        return Ok(HashMap::new());
    }

    if prop_delim == value_delim {
        let items: Vec<&str> = src.split(prop_delim).collect();
        if items.len() % 2 != 0 {
            return Err(ParseError::new(
                ErrorKind::InvalidFormat,
                format!("an odd number of elements when split on '{prop_delim}'"),
            )
            .with_value(src));
        }
        let mut map = HashMap::with_capacity(items.len() / 2);
        for pair in items.chunks(2) {
            map.insert(pair[0].to_string(), pair[1].to_string());
        }
        Ok(map)
    } else {
        let mut map = HashMap::new();
        for pair in src.split(prop_delim) {
            let mut parts = pair.splitn(2, value_delim);
            let name = parts.next().unwrap_or("");
            let value = parts.next().ok_or_else(|| {
                ParseError::new(
                    ErrorKind::InvalidFormat,
                    format!("a pair must be in the form of name{value_delim}value"),
                )
                .with_value(pair)
            })?;
            map.insert(name.to_string(), value.to_string());
        }
        Ok(map)
    }
}
