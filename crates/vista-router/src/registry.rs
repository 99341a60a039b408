// File: src/registry.rs
// Purpose: Two-phase route registry (build once, read concurrently)

use crate::error::{Result, RouteError};
use crate::route::{RouteDeclaration, RoutePattern};
use crate::Signature;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::info;

/// Qualifier key used for the default variant
const DEFAULT_QUALIFIER: &str = "";

/// Collects route declarations during initialization
///
/// Registration validates each route immediately; [`RegistryBuilder::build`] then freezes
/// the routes into a read-only [`RouteRegistry`].
///
/// # Examples
///
/// ```
/// use vista_router::route::RouteDeclaration;
/// use vista_router::RegistryBuilder;
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .register(RouteDeclaration::new("test.html", "test", 1))?
///     .register(RouteDeclaration::new("test/${blafoo}.html", "test", 2))?;
///
/// let registry = builder.build();
/// let order: Vec<_> = registry.routes().iter().map(|r| r.pattern()).collect();
/// assert_eq!(order, ["test/${blafoo}.html", "test.html"]);
/// # Ok::<(), vista_router::RouteError>(())
/// ```
#[derive(Debug)]
pub struct RegistryBuilder<H> {
    routes: Vec<RoutePattern<H>>,
}

impl<H> Default for RegistryBuilder<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RegistryBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and adds a route
    ///
    /// # Errors
    ///
    /// Any compile error of the template, or [`RouteError::DuplicateSignature`] when a
    /// route of the same qualifier already declared an equal signature.
    pub fn register(&mut self, decl: RouteDeclaration<H>) -> Result<&mut Self> {
        let route = RoutePattern::compile(decl)?;

        if let Some(signature) = route.signature() {
            let taken = self
                .routes
                .iter()
                .any(|r| r.qualifier() == route.qualifier() && r.signature() == Some(signature));
            if taken {
                return Err(RouteError::DuplicateSignature {
                    signature: signature.clone(),
                    qualifier: route.qualifier().map(str::to_string),
                });
            }
        }

        info!(
            "Registered view {} -> {} (qualifier: {}, weight: {})",
            route.name(),
            route.pattern(),
            route.qualifier().unwrap_or(DEFAULT_QUALIFIER),
            route.weight()
        );

        self.routes.push(route);
        Ok(self)
    }

    /// Registers every declaration, stopping at the first error
    pub fn register_all<I>(&mut self, decls: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        decls
            .into_iter()
            .try_for_each(|decl| self.register(decl).map(|_| ()))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Sorts the routes and builds the lookup indexes
    pub fn build(self) -> RouteRegistry<H> {
        let mut routes = self.routes;
        // Stable: equal weights keep registration order
        routes.sort_by_key(|route| Reverse(route.weight()));

        let mut by_name: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();
        let mut by_signature: HashMap<String, HashMap<Signature, usize>> = HashMap::new();

        for (index, route) in routes.iter().enumerate() {
            let qualifier = route.qualifier().unwrap_or(DEFAULT_QUALIFIER);

            by_name
                .entry(route.name().to_string())
                .or_default()
                .entry(qualifier.to_string())
                .or_default()
                .push(index);

            if let Some(signature) = route.signature() {
                by_signature
                    .entry(qualifier.to_string())
                    .or_default()
                    .insert(signature.clone(), index);
            }
        }

        RouteRegistry {
            routes,
            by_name,
            by_signature,
        }
    }
}

/// Read-only route set with its three indexes
///
/// - all routes, highest weight first (forward matching order)
/// - view name → qualifier → routes in the same order
/// - qualifier → signature → route
#[derive(Debug)]
pub struct RouteRegistry<H> {
    routes: Vec<RoutePattern<H>>,
    by_name: HashMap<String, HashMap<String, Vec<usize>>>,
    by_signature: HashMap<String, HashMap<Signature, usize>>,
}

impl<H> RouteRegistry<H> {
    pub fn builder() -> RegistryBuilder<H> {
        RegistryBuilder::new()
    }

    /// All routes, highest weight first
    pub fn routes(&self) -> &[RoutePattern<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes registered under a view name for one qualifier, highest weight first
    pub fn routes_for_name(&self, name: &str, qualifier: Option<&str>) -> Vec<&RoutePattern<H>> {
        self.by_name
            .get(name)
            .and_then(|groups| groups.get(qualifier.unwrap_or(DEFAULT_QUALIFIER)))
            .map(|indexes| indexes.iter().map(|&i| &self.routes[i]).collect())
            .unwrap_or_default()
    }

    /// Whether any qualifier has a route with this view name
    pub fn has_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The route declaring `signature` for one qualifier
    pub fn route_for_signature(
        &self,
        signature: &Signature,
        qualifier: Option<&str>,
    ) -> Option<&RoutePattern<H>> {
        self.by_signature
            .get(qualifier.unwrap_or(DEFAULT_QUALIFIER))
            .and_then(|routes| routes.get(signature))
            .map(|&i| &self.routes[i])
    }

    /// View names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
