// File: src/error.rs
// Purpose: Error taxonomy of view dispatch

use vista_router::RouteError;

/// Errors raised while dispatching a request or building a link
///
/// `ErrorResponse` and `PageNotFound` are answers for the client. They are turned into an
/// [`Outcome::Error`](crate::Outcome::Error) by [`ViewService::handle_request`](crate::ViewService::handle_request).
/// Every other variant is a failure of the application itself.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A handler asks for a specific HTTP status
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(" ({})", m)).unwrap_or_default())]
    ErrorResponse { status: u16, message: Option<String> },

    /// No route matched, or a required input was missing
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// A handler asked the context for something it cannot provide
    #[error("view context: {0}")]
    Context(String),

    /// A value was present but could not be converted
    #[error("cannot convert {name} value '{value}': {reason}")]
    Conversion {
        name: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("render: {0}")]
    Render(String),
}

pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

impl ViewError {
    pub fn error_response(status: u16, message: impl Into<String>) -> Self {
        ViewError::ErrorResponse {
            status,
            message: Some(message.into()),
        }
    }

    pub fn status_only(status: u16) -> Self {
        ViewError::ErrorResponse {
            status,
            message: None,
        }
    }

    /// HTTP status a collaborator should answer with
    pub fn status(&self) -> u16 {
        match self {
            ViewError::ErrorResponse { status, .. } => *status,
            ViewError::PageNotFound(_) => NOT_FOUND,
            _ => INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is an answer for the client rather than an application failure
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            ViewError::ErrorResponse { .. } | ViewError::PageNotFound(_)
        )
    }

    /// Message to send along with the status, if any
    pub fn response_message(&self) -> Option<String> {
        match self {
            ViewError::ErrorResponse { message, .. } => message.clone(),
            ViewError::PageNotFound(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
