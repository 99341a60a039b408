// File: src/binder.rs
// Purpose: Resolve a view handler's declared inputs from the view context

use crate::context::ViewContext;
use crate::error::{Result, ViewError};
use std::collections::HashMap;
use std::str::FromStr;

/// Where the value of an input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Placeholder of the matched route
    PathPart(String),
    /// Query parameter
    Query(String),
    Cookie(String),
    /// Request attribute
    Attribute(String),
    /// Id of the current session
    SessionId,
    /// Qualifier of the matched route
    Qualifier,
}

impl Source {
    /// Session id and qualifier may always be absent
    pub fn always_optional(&self) -> bool {
        matches!(self, Source::SessionId | Source::Qualifier)
    }

    fn resolve<'a>(&self, ctx: &'a ViewContext) -> Option<&'a str> {
        match self {
            Source::PathPart(name) => ctx.path_part(name),
            Source::Query(name) => ctx.parameter(name),
            Source::Cookie(name) => ctx.cookie(name),
            Source::Attribute(name) => ctx.attribute(name),
            Source::SessionId => ctx.session_id.as_deref(),
            Source::Qualifier => ctx.qualifier(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::PathPart(name) => format!("path part '{}'", name),
            Source::Query(name) => format!("parameter '{}'", name),
            Source::Cookie(name) => format!("cookie '{}'", name),
            Source::Attribute(name) => format!("attribute '{}'", name),
            Source::SessionId => "session id".to_string(),
            Source::Qualifier => "qualifier".to_string(),
        }
    }
}

/// One declared handler input
///
/// # Examples
///
/// ```
/// use vista::binder::{ParamSpec, Source};
///
/// let page = ParamSpec::query("page").optional();
/// assert!(page.is_optional());
/// assert_eq!(page.source(), &Source::Query("page".to_string()));
/// assert!(ParamSpec::session_id("sid").is_optional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    source: Source,
    optional: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            source,
            optional: false,
        }
    }

    /// Input named after the placeholder it is read from
    pub fn path_part(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Source::PathPart(name))
    }

    pub fn query(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Source::Query(name))
    }

    pub fn cookie(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Source::Cookie(name))
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Source::Attribute(name))
    }

    pub fn session_id(name: impl Into<String>) -> Self {
        Self::new(name, Source::SessionId)
    }

    pub fn qualifier(name: impl Into<String>) -> Self {
        Self::new(name, Source::Qualifier)
    }

    /// Marks the input as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn is_optional(&self) -> bool {
        self.optional || self.source.always_optional()
    }
}

/// Binds a fixed list of inputs
#[derive(Debug, Clone, Default)]
pub struct ParameterBinder {
    params: Vec<ParamSpec>,
}

impl ParameterBinder {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Reads every declared input from `ctx`
    ///
    /// # Errors
    ///
    /// [`ViewError::PageNotFound`] for the first required input without a value.
    pub fn bind(&self, ctx: &ViewContext) -> Result<BoundArgs> {
        let values = self
            .params
            .iter()
            .map(|spec| match spec.source.resolve(ctx) {
                Some(value) => Ok((spec.name.clone(), Some(value.to_string()))),
                None if spec.is_optional() => Ok((spec.name.clone(), None)),
                None => Err(ViewError::PageNotFound(format!(
                    "{} is required but missing",
                    spec.source.describe()
                ))),
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(BoundArgs { values })
    }
}

/// Raw input values of one invocation, converted on access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    values: HashMap<String, Option<String>>,
}

impl BoundArgs {
    /// Raw value; `None` both for absent optional inputs and undeclared names
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.values.get(name)?.as_deref()
    }

    /// Converts an input to `T`; `Ok(None)` for an absent optional input
    ///
    /// # Errors
    ///
    /// - [`ViewError::Context`] if no input of this name was declared
    /// - [`ViewError::Conversion`] if the value does not parse as `T`
    pub fn get<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ViewError::Context(format!("no input named '{}' was declared", name)))?;

        value
            .as_deref()
            .map(|raw| {
                raw.parse::<T>().map_err(|e| ViewError::Conversion {
                    name: name.to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Like [`BoundArgs::get`], but an absent value is a [`ViewError::PageNotFound`]
    pub fn require<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(name)?
            .ok_or_else(|| ViewError::PageNotFound(format!("{} is required but missing", name)))
    }
}
