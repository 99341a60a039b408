/// Error types for route compilation, registration and link building
///
/// Configuration errors (`QuoteInLiteral`, `InvalidExpression`, `InvalidPattern`, `GroupCountMismatch`,
/// `InvalidSignatureField`, `DuplicateSignature`) are raised while the registry is being built and should abort
/// initialization. `UnknownView` and `NoViewForSignature` are caller errors raised by
/// `Router::build_path`. A plain routing miss is never an error, it is `None`.
use crate::Signature;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Literal template text must not contain a single quote
    #[error("path patterns must not contain \"'\" in literal text: {template}")]
    QuoteInLiteral { template: String },

    /// A `${...}` placeholder could not be compiled into an expression
    #[error("invalid placeholder expression '{expression}' in {template}: {reason}")]
    InvalidExpression {
        template: String,
        expression: String,
        reason: String,
    },

    /// The template could not be turned into a matcher
    #[error("invalid path pattern {template}: {reason}")]
    InvalidPattern { template: String, reason: String },

    /// The compiled matcher and the parameter list disagree
    #[error("regex group count {groups} does not match parameter count {params} in {template}")]
    GroupCountMismatch {
        template: String,
        groups: usize,
        params: usize,
    },

    /// A declared signature field contains the signature separator
    #[error("signature field '{field}' of {template} must not contain '|'")]
    InvalidSignatureField { template: String, field: String },

    /// Two routes of the same qualifier declared an equal signature
    #[error("signature '{signature}' defined twice (qualifier: {})", .qualifier.as_deref().unwrap_or("<default>"))]
    DuplicateSignature {
        signature: Signature,
        qualifier: Option<String>,
    },

    /// `build_path` was asked for a view name nobody registered
    #[error("unknown view {0}")]
    UnknownView(String),

    /// `build_path` found no route declaring the context's signature
    #[error("no view for signature: {0}")]
    NoViewForSignature(Signature),
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;
