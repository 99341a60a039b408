// File: src/context.rs
// Purpose: Per-request view context with path parts, query params, cookies and attributes

use std::collections::HashMap;
use vista_router::path;

/// Request data a view handler may bind its inputs from
///
/// The HTTP layer fills in what it knows (query string, cookie header, attributes, session).
/// Path parts and the qualifier are set by the service once a route matched.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    /// Decoded values of the matched route's placeholders
    path_parts: HashMap<String, String>,

    /// Qualifier of the matched route
    qualifier: Option<String>,

    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Parsed cookies
    pub cookies: HashMap<String, String>,

    /// Request attributes set by earlier processing stages
    pub attributes: HashMap<String, String>,

    /// Id of the current session, if there is one
    pub session_id: Option<String>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, `a=1&b=two+words`
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query = QueryParams::parse(query);
        self
    }

    /// Parses a `Cookie` header value, `a=1; b=2`
    pub fn with_cookie_header(mut self, header: &str) -> Self {
        self.cookies = Self::parse_cookies(header);
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Parse cookies from Cookie header
    fn parse_cookies(header: &str) -> HashMap<String, String> {
        header
            .split(';')
            .filter_map(|cookie| cookie.trim().split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    pub fn set_path_parts(&mut self, parts: HashMap<String, String>) {
        self.path_parts = parts;
    }

    pub fn path_parts(&self) -> &HashMap<String, String> {
        &self.path_parts
    }

    pub fn path_part(&self, name: &str) -> Option<&str> {
        self.path_parts.get(name).map(String::as_str)
    }

    pub fn set_qualifier(&mut self, qualifier: Option<&str>) {
        self.qualifier = qualifier.filter(|q| !q.is_empty()).map(str::to_string);
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Get a query parameter value
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Get a cookie value
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parses `a=1&b=2`; names and values are form-decoded, the first occurrence wins
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(path::decode(key))
                .or_insert_with(|| path::decode(value));
        }

        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }
}
