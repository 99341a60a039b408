/// Representations of a built path
use serde::{Deserialize, Serialize};

/// Which flavor of path `build_path` callers want
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Bare path as generated by the route, for internal references
    #[default]
    View,
    /// Prefixed with the application mount path and servlet name
    Relative,
    /// Additionally prefixed with scheme, host and port
    Absolute,
}

/// Where the application is mounted, used to turn view paths into links
///
/// # Examples
///
/// ```
/// use vista_router::path::{PathBase, PathType};
///
/// let base = PathBase::new(PathBase::server_url("https", "example.com", 443), "/app", "/view");
/// assert_eq!(base.apply("item/1.html", PathType::View), "item/1.html");
/// assert_eq!(base.apply("/item/1.html", PathType::Relative), "/app/view/item/1.html");
/// assert_eq!(
///     base.apply("/item/1.html", PathType::Absolute),
///     "https://example.com/app/view/item/1.html"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBase {
    server_url: String,
    context_path: String,
    servlet_path: String,
}

impl PathBase {
    pub fn new(
        server_url: impl Into<String>,
        context_path: impl Into<String>,
        servlet_path: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            context_path: context_path.into(),
            servlet_path: servlet_path.into(),
        }
    }

    /// Builds `scheme://host[:port]`, leaving out the default port of the scheme
    ///
    /// ```
    /// use vista_router::path::PathBase;
    ///
    /// assert_eq!(PathBase::server_url("http", "localhost", 80), "http://localhost");
    /// assert_eq!(PathBase::server_url("http", "localhost", 8080), "http://localhost:8080");
    /// assert_eq!(PathBase::server_url("https", "example.com", 80), "https://example.com:80");
    /// ```
    pub fn server_url(scheme: &str, host: &str, port: u16) -> String {
        let default_port = matches!((scheme, port), ("http", 80) | ("https", 443));
        if default_port {
            format!("{}://{}", scheme, host)
        } else {
            format!("{}://{}:{}", scheme, host, port)
        }
    }

    pub fn server_url_str(&self) -> &str {
        &self.server_url
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn servlet_path(&self) -> &str {
        &self.servlet_path
    }

    /// Produces the requested representation of a generated view path
    pub fn apply(&self, path: &str, path_type: PathType) -> String {
        match path_type {
            PathType::View => path.to_string(),
            PathType::Relative => {
                format!("{}{}{}", self.context_path, self.servlet_path, path)
            }
            PathType::Absolute => format!(
                "{}{}{}{}",
                self.server_url, self.context_path, self.servlet_path, path
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_view() {
        assert_eq!(PathType::default(), PathType::View);
    }

    #[test]
    fn test_empty_base_is_transparent() {
        let base = PathBase::default();
        assert_eq!(base.apply("/x", PathType::Relative), "/x");
        assert_eq!(base.apply("/x", PathType::Absolute), "/x");
    }

    #[test]
    fn test_https_non_default_port() {
        assert_eq!(
            PathBase::server_url("https", "example.com", 8443),
            "https://example.com:8443"
        );
    }
}
