// File: src/context.rs
// Purpose: Data a link is built for (the "path context")

use crate::signature::VARIABLE_PREFIX;
use crate::{Signature, Value};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Data bundle handed to `Router::build_path`
///
/// A path context exposes:
/// - its [`Signature`], computed from the fields that were actually populated,
/// - a bag of ad-hoc variables,
/// - typed field access for placeholder expressions,
/// - an optional qualifier selecting a variant group of views.
///
/// The router never retains a context beyond one call.
pub trait PathContext {
    /// Signature over the populated field names (variables prefixed with `#`)
    fn signature(&self) -> Signature;

    /// Ad-hoc variables; these win over fields of the same name
    fn variables(&self) -> &HashMap<String, Value>;

    /// Structured field lookup
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Qualifier of the views to build links for, `None` for the default variant
    fn qualifier(&self) -> Option<&str> {
        None
    }
}

/// General purpose [`PathContext`] built from named values
///
/// # Examples
///
/// ```
/// use vista_router::{PathContext, PathData, Signature};
///
/// let data = PathData::new()
///     .with_field("page", 5)
///     .with_variable("type", "thumb");
///
/// assert_eq!(data.signature(), Signature::new(["page", "#type"]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathData {
    fields: HashMap<String, Value>,
    variables: HashMap<String, Value>,
    properties: BTreeSet<String>,
    qualifier: Option<String>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a typed field. Null values are stored but do not count as populated.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Adds an ad-hoc variable, registered in the signature as `#name`
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_variable(name, value);
        self
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into()).filter(|q| !q.is_empty());
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if value.is_null() {
            self.properties.remove(&name);
        } else {
            self.properties.insert(name.clone());
        }
        self.fields.insert(name, value);
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.properties.insert(format!("{}{}", VARIABLE_PREFIX, name));
        self.variables.insert(name, value.into());
    }

    /// Builds a context from the top-level fields of any serializable value
    ///
    /// Each object member becomes a field; members that serialize to `null` (e.g. `None`)
    /// are not part of the signature.
    ///
    /// ```
    /// use serde::Serialize;
    /// use vista_router::{PathContext, PathData, Signature};
    ///
    /// #[derive(Serialize)]
    /// struct Picture { id: u32, title: String, album: Option<u32> }
    ///
    /// let data = PathData::from_serialize(&Picture { id: 3, title: "Sunset".into(), album: None }).unwrap();
    /// assert_eq!(data.signature(), Signature::new(["id", "title"]));
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .fold(Self::new(), |data, (k, v)| data.with_field(k, Value::from(v)))),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "path data must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Field names that count as populated, in signature form
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }
}

impl PathContext for PathData {
    fn signature(&self) -> Signature {
        Signature::new(&self.properties)
    }

    fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}
