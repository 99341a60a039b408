// File: src/interceptor.rs
// Purpose: Hooks into request dispatch

use crate::context::ViewContext;
use crate::error::ViewError;

/// Observes and adjusts request dispatch
///
/// Every hook has a no-op default, so implementations only override what they need.
/// Interceptors run in registration order.
pub trait ViewInterceptor: Send + Sync {
    /// A request is about to be dispatched
    fn on_request(&self, _path: &str, _ctx: &ViewContext) {}

    /// A route matched and its handler is about to be invoked
    fn on_view_handler_invocation(&self, _ctx: &ViewContext, _handler_id: &str) {}

    /// The handler returned a template; return `Some` to render another one instead
    fn on_rendering(&self, _template: &str, _ctx: &ViewContext) -> Option<String> {
        None
    }

    /// The handler answered with an error response; return `true` if it was dealt with
    fn on_error_response(&self, _error: &ViewError, _ctx: &ViewContext) -> bool {
        false
    }
}

/// Interceptor that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInterceptor;

impl ViewInterceptor for EmptyInterceptor {}
