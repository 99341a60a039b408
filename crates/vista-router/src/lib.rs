//! # Vista Router
//!
//! A bidirectional router for server-side view dispatch:
//! - **Forward**: request path → best matching view plus decoded path parameters
//! - **Reverse**: data object → the view able to render it plus its URL
//!
//! ## Route templates
//!
//! Templates are literal text with `${expression}` placeholders:
//!
//! - `picture/${id}.html` - field lookup
//! - `list/${#type}/${page}.html` - `#type` only looks at ad-hoc variables
//! - `picture/${id}/${#simplify(title)}.html` - URL-friendly transform
//! - `raw/${#encode(name)}` and `file.${#suffix(mime)}` - percent-encoding, file suffixes
//!
//! A placeholder never matches a `/`, and may match the empty string.
//!
//! ## Weighting
//!
//! Overlapping routes are ordered by weight, highest first: every `/` counts 10, every other
//! literal character 5 and each placeholder 1. Equal weights keep registration order.
//!
//! ## Signatures
//!
//! A route may declare the field names of the data it renders. The declared set becomes its
//! [`Signature`], unique per qualifier, so [`Router::build_path`] can pick the route from
//! the shape of the data alone.
//!
//! ## Example
//!
//! ```
//! use vista_router::route::RouteDeclaration;
//! use vista_router::{PathData, RegistryBuilder, Router};
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register(
//!     RouteDeclaration::new("picture/${id}/${#simplify(title)}.html", "pictureView", "picture.jsp")
//!         .with_signature(["id", "title"]),
//! )?;
//! let router = Router::new(builder.build());
//!
//! let found = router.match_path("picture/12/sunset-at-sea.html").unwrap();
//! assert_eq!(found.param("id"), Some("12"));
//! assert_eq!(*found.handler(), "picture.jsp");
//!
//! let data = PathData::new().with_field("id", 12).with_field("title", "Sunset at Sea");
//! assert_eq!(
//!     router.build_path(&data, None, None)?,
//!     Some("picture/12/sunset-at-sea.html".to_string())
//! );
//! # Ok::<(), vista_router::RouteError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

// ============================================================================
// Module Declarations
// ============================================================================

mod context;
pub mod error;
pub mod path;
mod registry;
pub mod route;
mod signature;
mod value;

pub use context::{PathContext, PathData};
pub use error::{Result, RouteError};
pub use path::{PathBase, PathType};
pub use registry::{RegistryBuilder, RouteRegistry};
pub use route::{RouteDeclaration, RoutePattern};
pub use signature::{Signature, VARIABLE_PREFIX};
pub use value::Value;

// ============================================================================
// Match Result
// ============================================================================

/// A successful forward match
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The winning route
    pub route: &'a RoutePattern<H>,
    /// Decoded parameter values by placeholder name
    pub params: HashMap<String, String>,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn handler(&self) -> &'a H {
        self.route.handler()
    }

    pub fn qualifier(&self) -> Option<&'a str> {
        self.route.qualifier()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Matching and link building over a frozen [`RouteRegistry`]
///
/// Cloning is cheap; all clones share the registry. The router holds no mutable state, so
/// it can be used from any number of threads at once.
#[derive(Debug)]
pub struct Router<H> {
    registry: Arc<RouteRegistry<H>>,
}

impl<H> Clone for Router<H> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<H> From<RouteRegistry<H>> for Router<H> {
    fn from(registry: RouteRegistry<H>) -> Self {
        Self::new(registry)
    }
}

impl<H> Router<H> {
    pub fn new(registry: RouteRegistry<H>) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &RouteRegistry<H> {
        &self.registry
    }

    /// Finds the route for a request path
    ///
    /// Routes are tried highest weight first; the first matching one wins. `None` is the
    /// ordinary "no route" outcome.
    ///
    /// ```
    /// use vista_router::route::RouteDeclaration;
    /// use vista_router::{RegistryBuilder, Router};
    ///
    /// let mut builder = RegistryBuilder::new();
    /// builder.register(RouteDeclaration::new("test/${blafoo}.html", "generic", ()))?;
    /// builder.register(RouteDeclaration::new("test/index.html", "index", ()))?;
    /// let router = Router::new(builder.build());
    ///
    /// assert_eq!(router.match_path("test/index.html").unwrap().route.name(), "index");
    /// assert_eq!(router.match_path("test/other.html").unwrap().param("blafoo"), Some("other"));
    /// assert!(router.match_path("nothing/here").is_none());
    /// # Ok::<(), vista_router::RouteError>(())
    /// ```
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, H>> {
        let found = self.registry.routes().iter().find_map(|route| {
            trace!("Trying {} against {}", route.pattern(), path);
            route.matches(path).map(|params| RouteMatch { route, params })
        });

        match &found {
            Some(m) => debug!("Matched {} to view {} ({})", path, m.route.name(), m.route.pattern()),
            None => debug!("No route for {}", path),
        }
        found
    }

    /// Builds the view path for `context`
    ///
    /// With a `view` name the candidates are that view's routes for `qualifier`, highest
    /// weight first. Without one, the single route declaring the context's signature is
    /// used. The first candidate whose placeholders all resolve wins.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownView`] if `view` has no routes for `qualifier`
    /// - [`RouteError::NoViewForSignature`] if no route declares the context's signature
    ///
    /// `Ok(None)` means candidates exist but none can render this data.
    pub fn build_path(
        &self,
        context: &dyn PathContext,
        view: Option<&str>,
        qualifier: Option<&str>,
    ) -> Result<Option<String>> {
        let qualifier = qualifier.filter(|q| !q.is_empty());

        let candidates = match view {
            Some(name) => {
                let routes = self.registry.routes_for_name(name, qualifier);
                if routes.is_empty() {
                    return Err(RouteError::UnknownView(name.to_string()));
                }
                routes
            }
            None => {
                let signature = context.signature();
                match self.registry.route_for_signature(&signature, qualifier) {
                    Some(route) => vec![route],
                    None => return Err(RouteError::NoViewForSignature(signature)),
                }
            }
        };

        let path = candidates
            .iter()
            .find_map(|route| route.generate(context));

        if path.is_none() {
            debug!(
                "No route of {} can render the given data",
                view.unwrap_or("<signature>")
            );
        }
        Ok(path)
    }

    /// Builds a path and renders it in the requested flavor
    ///
    /// ```
    /// use vista_router::route::RouteDeclaration;
    /// use vista_router::{PathBase, PathData, PathType, RegistryBuilder, Router};
    ///
    /// let mut builder = RegistryBuilder::new();
    /// builder.register(RouteDeclaration::new("/item/${id}.html", "itemView", ()))?;
    /// let router = Router::new(builder.build());
    ///
    /// let base = PathBase::new("http://localhost:8080", "/shop", "/view");
    /// let data = PathData::new().with_field("id", 7);
    /// assert_eq!(
    ///     router.build_link(&data, Some("item"), None, PathType::Absolute, &base)?,
    ///     Some("http://localhost:8080/shop/view/item/7.html".to_string())
    /// );
    /// # Ok::<(), vista_router::RouteError>(())
    /// ```
    pub fn build_link(
        &self,
        context: &dyn PathContext,
        view: Option<&str>,
        qualifier: Option<&str>,
        path_type: PathType,
        base: &PathBase,
    ) -> Result<Option<String>> {
        Ok(self
            .build_path(context, view, qualifier)?
            .map(|path| base.apply(&path, path_type)))
    }
}
