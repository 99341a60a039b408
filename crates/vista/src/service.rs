// File: src/service.rs
// Purpose: Request dispatch, link building and template resolution

use crate::binder::{BoundArgs, ParamSpec, ParameterBinder};
use crate::config::VistaConfig;
use crate::context::ViewContext;
use crate::error::{Result, ViewError};
use crate::interceptor::ViewInterceptor;
use anyhow::Context as _;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use vista_router::{
    PathBase, PathContext, PathType, RegistryBuilder, RouteDeclaration, RouteError, Router,
};

/// Signature of a view handler
///
/// Returns the name of the template to render, or `None` if the handler produced the
/// response by itself.
pub type HandlerFn = dyn Fn(&BoundArgs, &ViewContext) -> Result<Option<String>> + Send + Sync;

/// A view handler together with its declared inputs
#[derive(Clone)]
pub struct ViewBinding {
    id: String,
    binder: ParameterBinder,
    handler: Arc<HandlerFn>,
}

impl fmt::Debug for ViewBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBinding")
            .field("id", &self.id)
            .field("params", &self.binder.params())
            .finish()
    }
}

impl ViewBinding {
    pub fn new<F>(id: impl Into<String>, params: Vec<ParamSpec>, handler: F) -> Self
    where
        F: Fn(&BoundArgs, &ViewContext) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            binder: ParameterBinder::new(params),
            handler: Arc::new(handler),
        }
    }

    /// Handler that always renders the same template
    pub fn template(id: impl Into<String>, template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(id, Vec::new(), move |_, _| Ok(Some(template.clone())))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declares a route served by this binding, named after its id
    pub fn route(self, pattern: impl Into<String>) -> RouteDeclaration<ViewBinding> {
        let id = self.id.clone();
        RouteDeclaration::new(pattern, id, self)
    }

    /// Binds the inputs and calls the handler
    pub fn invoke(&self, ctx: &ViewContext) -> Result<Option<String>> {
        let args = self.binder.bind(ctx)?;
        (self.handler)(&args, ctx)
    }
}

/// What the HTTP layer should do after [`ViewService::handle_request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Forward to this template path
    Render(String),
    /// Send an error status
    Error { status: u16, message: Option<String> },
    /// The response was already produced by a handler or an interceptor
    Handled,
}

// ============================================================================
// Builder
// ============================================================================

/// Collects views and settings for a [`ViewService`]
pub struct ViewServiceBuilder {
    registry: RegistryBuilder<ViewBinding>,
    interceptors: Vec<Arc<dyn ViewInterceptor>>,
    template_prefix: String,
    base: PathBase,
}

impl fmt::Debug for ViewServiceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewServiceBuilder")
            .field("registry", &self.registry)
            .field("interceptors", &self.interceptors.len())
            .field("template_prefix", &self.template_prefix)
            .field("base", &self.base)
            .finish()
    }
}

impl Default for ViewServiceBuilder {
    fn default() -> Self {
        let config = VistaConfig::default();
        Self {
            registry: RegistryBuilder::new(),
            interceptors: Vec::new(),
            template_prefix: config.routing.template_prefix.clone(),
            base: config.path_base(),
        }
    }
}

impl ViewServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with the mount points and views of a configuration
    ///
    /// `lookup` resolves each `[[views]]` handler identifier to its binding.
    pub fn from_config<F>(config: &VistaConfig, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<ViewBinding>,
    {
        let mut builder = Self::new()
            .with_template_prefix(&config.routing.template_prefix)
            .with_path_base(config.path_base());

        for view in &config.views {
            let binding = lookup(&view.handler)
                .with_context(|| format!("No handler '{}' for view {}", view.handler, view.pattern))?;
            builder
                .register(view.declaration(binding))
                .with_context(|| format!("Invalid view {}", view.pattern))?;
        }

        Ok(builder)
    }

    /// Adds a view
    ///
    /// # Errors
    ///
    /// Configuration errors of the route, see [`RegistryBuilder::register`].
    pub fn register(
        &mut self,
        decl: RouteDeclaration<ViewBinding>,
    ) -> std::result::Result<&mut Self, RouteError> {
        self.registry.register(decl)?;
        Ok(self)
    }

    pub fn with_interceptor(mut self, interceptor: impl ViewInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_template_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.template_prefix = prefix.into();
        self
    }

    pub fn with_path_base(mut self, base: PathBase) -> Self {
        self.base = base;
        self
    }

    pub fn build(self) -> ViewService {
        ViewService {
            router: Router::new(self.registry.build()),
            interceptors: self.interceptors,
            template_prefix: self.template_prefix,
            base: self.base,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Dispatches requests to views and builds links to them
///
/// Immutable after [`ViewServiceBuilder::build`]; share it between request threads as is.
#[derive(Clone)]
pub struct ViewService {
    router: Router<ViewBinding>,
    interceptors: Vec<Arc<dyn ViewInterceptor>>,
    template_prefix: String,
    base: PathBase,
}

impl fmt::Debug for ViewService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewService")
            .field("views", &self.router.registry().len())
            .field("interceptors", &self.interceptors.len())
            .field("template_prefix", &self.template_prefix)
            .finish()
    }
}

impl ViewService {
    pub fn builder() -> ViewServiceBuilder {
        ViewServiceBuilder::new()
    }

    pub fn router(&self) -> &Router<ViewBinding> {
        &self.router
    }

    pub fn path_base(&self) -> &PathBase {
        &self.base
    }

    /// Handles a request for `path`
    ///
    /// Error responses raised by the view (including "not found") become
    /// [`Outcome::Error`] unless an interceptor claims them. Any other error is returned.
    pub fn handle_request(&self, path: &str, ctx: &mut ViewContext) -> Result<Outcome> {
        self.interceptors
            .iter()
            .for_each(|it| it.on_request(path, ctx));

        let template = match self.invoke_view(path, ctx) {
            Ok(template) => template,
            Err(err) if err.is_response() => {
                debug!("View handler returned HTTP status {} for path '{}': {}", err.status(), path, err);

                if self.interceptors.iter().any(|it| it.on_error_response(&err, ctx)) {
                    return Ok(Outcome::Handled);
                }
                return Ok(Outcome::Error {
                    status: err.status(),
                    message: err.response_message(),
                });
            }
            Err(err) => return Err(err),
        };

        let Some(template) = template else {
            return Ok(Outcome::Handled);
        };

        let template = self.interceptors.iter().fold(template, |current, it| {
            it.on_rendering(&current, ctx).unwrap_or(current)
        });

        Ok(Outcome::Render(self.template_path(&template)?))
    }

    /// Finds the view for `path` and invokes its handler
    ///
    /// Sets the path parts and the qualifier of the match on `ctx`.
    ///
    /// # Errors
    ///
    /// [`ViewError::PageNotFound`] if no route matches, plus whatever the handler raises.
    pub fn invoke_view(&self, path: &str, ctx: &mut ViewContext) -> Result<Option<String>> {
        let found = self
            .router
            .match_path(path)
            .ok_or_else(|| ViewError::PageNotFound(format!("No page found at {}", path)))?;

        ctx.set_path_parts(found.params);
        ctx.set_qualifier(found.route.qualifier());

        let binding = found.route.handler();
        self.interceptors
            .iter()
            .for_each(|it| it.on_view_handler_invocation(ctx, binding.id()));

        binding.invoke(ctx)
    }

    /// Builds a link to a view able to render `data`
    ///
    /// The qualifier comes from `data`. An empty `view` selects by signature.
    ///
    /// # Errors
    ///
    /// [`ViewError::Route`] for an unknown view name or an unknown signature.
    pub fn build_path(
        &self,
        data: &dyn PathContext,
        view: Option<&str>,
        path_type: PathType,
    ) -> Result<Option<String>> {
        let view = view.filter(|v| !v.is_empty());
        Ok(self
            .router
            .build_link(data, view, data.qualifier(), path_type, &self.base)?)
    }

    /// Full path of a template, `/WEB-INF/jsp/` + name without its leading `/`
    pub fn template_path(&self, template: &str) -> Result<String> {
        if template.is_empty() {
            return Err(ViewError::Render("template name not set".to_string()));
        }

        let name = template.strip_prefix('/').unwrap_or(template);
        Ok(format!("{}{}", self.template_prefix, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template_path() {
        let service = ViewService::builder().build();
        assert_eq!(service.template_path("picture.jsp").unwrap(), "/WEB-INF/jsp/picture.jsp");
        assert_eq!(service.template_path("/picture.jsp").unwrap(), "/WEB-INF/jsp/picture.jsp");
        assert!(matches!(service.template_path(""), Err(ViewError::Render(_))));
    }

    #[test]
    fn test_binding_route_uses_id() {
        let decl = ViewBinding::template("albumView", "album.jsp").route("album/${id}.html");
        assert_eq!(decl.handler_id, "albumView");
        assert_eq!(decl.view_name(), "album");
    }

    #[test]
    fn test_debug_hides_handler() {
        let binding = ViewBinding::template("a", "a.jsp");
        assert!(format!("{:?}", binding).contains("\"a\""));
    }
}
