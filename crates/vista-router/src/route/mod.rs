// File: src/route/mod.rs
// Purpose: Route declarations and compiled, immutable route patterns

pub mod compiler;
pub mod expr;

use crate::error::{Result, RouteError};
use crate::path;
use crate::{PathContext, Signature};
use expr::Expr;
use regex::Regex;
use std::collections::HashMap;

// ============================================================================
// Declaration
// ============================================================================

/// One route as handed in by whatever discovers the views
///
/// `H` is the opaque handler binding the router hands back on a match.
///
/// # Examples
///
/// ```
/// use vista_router::route::RouteDeclaration;
///
/// let decl = RouteDeclaration::new("picture/${id}.html", "pictureView", ())
///     .with_signature(["id"])
///     .with_qualifier("rss");
///
/// assert_eq!(decl.view_name(), "picture");
/// ```
#[derive(Debug, Clone)]
pub struct RouteDeclaration<H> {
    pub pattern: String,
    pub name: Option<String>,
    pub handler_id: String,
    pub signature: Option<Vec<String>>,
    pub qualifier: Option<String>,
    pub handler: H,
}

impl<H> RouteDeclaration<H> {
    pub fn new(pattern: impl Into<String>, handler_id: impl Into<String>, handler: H) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            handler_id: handler_id.into(),
            signature: None,
            qualifier: None,
            handler,
        }
    }

    /// Explicit view name, overriding the one derived from the handler id
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    /// Field names of the data this view renders
    pub fn with_signature<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Variant group; an empty qualifier is the default variant
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into()).filter(|q| !q.is_empty());
        self
    }

    pub fn view_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => derive_view_name(&self.handler_id),
        }
    }
}

/// Derives a view name from a handler identifier
///
/// A trailing `_view` or `View` is stripped as long as something remains.
///
/// ```
/// use vista_router::route::derive_view_name;
///
/// assert_eq!(derive_view_name("pictureView"), "picture");
/// assert_eq!(derive_view_name("album_view"), "album");
/// assert_eq!(derive_view_name("View"), "View");
/// assert_eq!(derive_view_name("index"), "index");
/// ```
pub fn derive_view_name(handler_id: &str) -> String {
    ["_view", "View"]
        .iter()
        .find_map(|suffix| handler_id.strip_suffix(suffix).filter(|s| !s.is_empty()))
        .unwrap_or(handler_id)
        .to_string()
}

// ============================================================================
// Compiled pattern
// ============================================================================

/// A compiled route, immutable after construction
#[derive(Debug, Clone)]
pub struct RoutePattern<H> {
    pattern: String,
    name: String,
    handler_id: String,
    handler: H,
    fields: Vec<String>,
    signature: Option<Signature>,
    qualifier: Option<String>,
    regex: Regex,
    segments: Vec<Expr>,
    params: Vec<String>,
    weight: u32,
}

impl<H> RoutePattern<H> {
    /// Compiles a declaration
    ///
    /// Only a non-empty declared field list produces a signature; without one the
    /// route can still be built by name.
    pub fn compile(decl: RouteDeclaration<H>) -> Result<Self> {
        let compiled = compiler::compile(&decl.pattern)?;
        let name = decl.view_name();

        let declared = decl.signature.filter(|fields| !fields.is_empty());
        if let Some(field) = declared
            .iter()
            .flatten()
            .find(|f| !Signature::is_valid_member(f))
        {
            return Err(RouteError::InvalidSignatureField {
                template: decl.pattern,
                field: field.clone(),
            });
        }
        let signature = declared.as_ref().map(Signature::new);
        let fields = declared.unwrap_or_else(|| compiled.params.clone());

        Ok(Self {
            pattern: decl.pattern,
            name,
            handler_id: decl.handler_id,
            handler: decl.handler,
            fields,
            signature,
            qualifier: decl.qualifier.filter(|q| !q.is_empty()),
            regex: compiled.regex,
            segments: compiled.segments,
            params: compiled.params,
            weight: compiled.weight,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler_id(&self) -> &str {
        &self.handler_id
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Declared field names, or the placeholder texts when none were declared
    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Matches a request path, returning the decoded parameter values by name
    ///
    /// ```
    /// use vista_router::route::{RouteDeclaration, RoutePattern};
    ///
    /// let route = RoutePattern::compile(RouteDeclaration::new("tag/${name}.html", "tag", ())).unwrap();
    /// let params = route.matches("tag/caf%C3%A9+bar.html").unwrap();
    /// assert_eq!(params.get("name").map(String::as_str), Some("café bar"));
    /// assert!(route.matches("tag/a/b.html").is_none());
    /// ```
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        debug_assert_eq!(
            caps.len() - 1,
            self.params.len(),
            "capture groups out of sync with parameters for {}",
            self.pattern
        );

        Some(
            self.params
                .iter()
                .zip(caps.iter().skip(1))
                .map(|(name, value)| {
                    let raw = value.map_or("", |m| m.as_str());
                    (name.clone(), path::decode(raw))
                })
                .collect(),
        )
    }

    /// Generates the view path for `context`
    ///
    /// `None` if any placeholder cannot be resolved. Runs of `/` left behind by empty
    /// values are collapsed.
    pub fn generate(&self, context: &dyn PathContext) -> Option<String> {
        let raw = self
            .segments
            .iter()
            .map(|segment| segment.evaluate(context))
            .collect::<Option<String>>()?;

        Some(path::collapse_separators(&raw).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathData;
    use pretty_assertions::assert_eq;

    fn route(pattern: &str) -> RoutePattern<()> {
        RoutePattern::compile(RouteDeclaration::new(pattern, "testView", ())).unwrap()
    }

    #[test]
    fn test_name_from_handler() {
        assert_eq!(route("a.html").name(), "test");
    }

    #[test]
    fn test_explicit_name_wins() {
        let decl = RouteDeclaration::new("a.html", "testView", ()).with_name("other");
        assert_eq!(RoutePattern::compile(decl).unwrap().name(), "other");
    }

    #[test]
    fn test_signature_only_when_declared() {
        assert!(route("p/${id}.html").signature().is_none());
        assert_eq!(route("p/${id}.html").field_names().to_vec(), vec!["id".to_string()]);

        let decl = RouteDeclaration::new("p/${id}.html", "p", ()).with_signature(["id"]);
        let declared = RoutePattern::compile(decl).unwrap();
        assert_eq!(declared.signature(), Some(&Signature::new(["id"])));

        let empty =
            RouteDeclaration::new("p/${id}.html", "p", ()).with_signature(Vec::<String>::new());
        assert!(RoutePattern::compile(empty).unwrap().signature().is_none());
    }

    #[test]
    fn test_signature_field_with_separator_rejected() {
        let decl = RouteDeclaration::new("y/${q}.html", "y", ()).with_signature(["q", "a|b"]);
        assert_eq!(
            RoutePattern::compile(decl).unwrap_err(),
            RouteError::InvalidSignatureField {
                template: "y/${q}.html".to_string(),
                field: "a|b".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_qualifier_is_default() {
        let decl = RouteDeclaration::new("a.html", "a", ()).with_qualifier("");
        assert_eq!(RoutePattern::compile(decl).unwrap().qualifier(), None);
    }

    #[test]
    fn test_matches_extracts_in_order() {
        let params = route("test/${blafoo}/and/a/${path}.html")
            .matches("test/Something/and/a/1234.html")
            .unwrap();
        assert_eq!(params.get("blafoo").map(String::as_str), Some("Something"));
        assert_eq!(params.get("path").map(String::as_str), Some("1234"));
    }

    #[test]
    fn test_matches_empty_values() {
        let params = route("test/${a}/and/a/${b}.html")
            .matches("test//and/a/.html")
            .unwrap();
        assert_eq!(params.get("a").map(String::as_str), Some(""));
        assert_eq!(params.get("b").map(String::as_str), Some(""));
    }

    #[test]
    fn test_generate() {
        let data = PathData::new().with_field("a", "x").with_field("b", 7);
        assert_eq!(
            route("test/${a}/and/a/${b}.html").generate(&data),
            Some("test/x/and/a/7.html".to_string())
        );
    }

    #[test]
    fn test_generate_collapses_separators() {
        let data = PathData::new().with_field("a", "").with_field("b", "");
        assert_eq!(
            route("test/${a}/and/a/${b}.html").generate(&data),
            Some("test/and/a/.html".to_string())
        );
    }

    #[test]
    fn test_generate_missing_field() {
        let data = PathData::new().with_field("a", "x");
        assert_eq!(route("test/${a}/${b}.html").generate(&data), None);
    }
}
