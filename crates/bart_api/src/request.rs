//! Request descriptors and URL assembly

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Parameters the builder always sets itself
pub const RESERVED_PARAMS: [&str; 3] = ["cmd", "json", "key"];

/// A single API call: endpoint path, command token and extra query options.
///
/// Options are kept in a `BTreeMap` so the emitted query string is always in
/// lexicographic key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: &'static str,
    cmd: &'static str,
    options: BTreeMap<String, Vec<String>>,
}

impl ApiRequest {
    /// Create a request for `path` (e.g. `/etd.aspx`) with command `cmd`
    #[must_use]
    pub fn new(path: &'static str, cmd: &'static str) -> Self {
        debug_assert!(!path.is_empty() && !cmd.is_empty());
        Self {
            path,
            cmd,
            options: BTreeMap::new(),
        }
    }

    /// Set a query option, replacing any earlier values for the key
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options.insert(key.to_string(), vec![value.into()]);
        self
    }

    /// Add another value for a query option, after any already set
    #[must_use]
    pub fn append(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options
            .entry(key.to_string())
            .or_default()
            .push(value.into());
        self
    }

    /// Set a query option only if `value` is present and non-empty
    #[must_use]
    pub fn with_optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.with(key, value),
            _ => self,
        }
    }

    /// Endpoint path
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Command token
    #[must_use]
    pub const fn cmd(&self) -> &'static str {
        self.cmd
    }

    /// Values set for an option, if any
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&[String]> {
        self.options.get(key).map(Vec::as_slice)
    }

    /// Assemble `base_url + path + "?" + query`.
    ///
    /// `cmd`, `json=y` and `key` are always present exactly once; anything a
    /// caller put under those names is overwritten.
    #[must_use]
    pub fn url(&self, base_url: &str, api_key: &str) -> String {
        let mut params: BTreeMap<&str, Vec<&str>> = self
            .options
            .iter()
            .map(|(key, values)| (key.as_str(), values.iter().map(String::as_str).collect()))
            .collect();
        params.insert("cmd", vec![self.cmd]);
        params.insert("json", vec!["y"]);
        params.insert("key", vec![api_key]);

        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &params {
            for value in values {
                query.append_pair(key, value);
            }
        }

        format!("{base_url}{}?{}", self.path, query.finish())
    }
}
