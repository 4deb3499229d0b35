//! Request view: the read-only surface the location decoders (C5) pull raw
//! serialized values from. [`RequestView`] is a trait so the decoders stay
//! agnostic to the concrete transport rather than binding to one HTTP stack.
//!
//! [`MapRequestView`] is the concrete adapter callers build from an actual
//! request, carrying path/query/header/cookie data as owned string
//! collections rather than borrowing from the wire buffer.

/// Read-only access to the parts of a request the decoding core needs.
pub trait RequestView {
    /// Look up a path-captured raw string by its storage key (see
    /// `decode::path::storage_key`): plain `name` for `simple`, `.name` for
    /// `label`, `;name` for `matrix`.
    fn path_param(&self, storage_key: &str) -> Option<&str>;

    /// All query string pairs, in the order they appeared. A name may
    /// repeat (multi-valued query parameters).
    fn query_params(&self) -> &[(String, String)];

    /// Case-insensitive header lookup, returning the combined value.
    fn header(&self, name: &str) -> Option<&str>;

    /// Cookie lookup by exact name.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// The first raw value for `name` among [`RequestView::query_params`], if any.
    fn first_query_value(&self, name: &str) -> Option<&str> {
        self.query_params()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All raw values for `name`, in order, among [`RequestView::query_params`].
    fn all_query_values(&self, name: &str) -> Vec<&str> {
        self.query_params()
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// A plain, owned [`RequestView`] built from already-extracted strings.
///
/// HTTP routing, URL decoding, and path-template capture are out of scope
/// for this core; callers populate a `MapRequestView` from whatever
/// router/HTTP library they use.
#[derive(Debug, Clone, Default)]
pub struct MapRequestView {
    pub path_params: std::collections::HashMap<String, String>,
    pub query_params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
}

impl MapRequestView {
    pub fn new() -> Self {
        MapRequestView::default()
    }

    pub fn with_path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }
}

impl RequestView for MapRequestView {
    fn path_param(&self, storage_key: &str) -> Option<&str> {
        self.path_params.get(storage_key).map(String::as_str)
    }

    fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
