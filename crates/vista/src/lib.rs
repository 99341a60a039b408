// File: src/lib.rs
// Purpose: View dispatch on top of vista-router

//! # Vista
//!
//! Ties the [`vista_router`] engine to request handling:
//!
//! - [`ViewService::handle_request`] matches a path, binds the handler's inputs from the
//!   [`ViewContext`], runs the [`ViewInterceptor`]s and resolves the template to render
//! - [`ViewService::build_path`] builds links in any [`PathType`] flavor
//! - [`VistaConfig`] reads mount points and a declarative view table from `vista.toml`
//!
//! ## Example
//!
//! ```
//! use vista::binder::ParamSpec;
//! use vista::{Outcome, ViewBinding, ViewContext, ViewService};
//! use vista_router::{PathData, PathType};
//!
//! let picture = ViewBinding::new(
//!     "pictureView",
//!     vec![ParamSpec::path_part("id")],
//!     |args, _ctx| {
//!         let id: u32 = args.require("id")?;
//!         Ok(Some(format!("picture-{}.jsp", id % 2)))
//!     },
//! );
//!
//! let mut builder = ViewService::builder();
//! builder.register(picture.route("/picture/${id}.html").with_signature(["id"]))?;
//! let service = builder.build();
//!
//! let mut ctx = ViewContext::new();
//! assert_eq!(
//!     service.handle_request("/picture/7.html", &mut ctx)?,
//!     Outcome::Render("/WEB-INF/jsp/picture-1.jsp".to_string())
//! );
//!
//! let data = PathData::new().with_field("id", 7);
//! assert_eq!(
//!     service.build_path(&data, None, PathType::View)?,
//!     Some("/picture/7.html".to_string())
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod config;
pub mod context;
pub mod error;
pub mod interceptor;
pub mod service;

pub use binder::{BoundArgs, ParamSpec, ParameterBinder, Source};
pub use config::{RoutingConfig, ServerConfig, ViewConfig, VistaConfig};
pub use context::{QueryParams, ViewContext};
pub use error::{Result, ViewError};
pub use interceptor::{EmptyInterceptor, ViewInterceptor};
pub use service::{HandlerFn, Outcome, ViewBinding, ViewService, ViewServiceBuilder};

pub use vista_router::{PathBase, PathContext, PathData, PathType, Signature, Value};
