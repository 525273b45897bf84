//! Route Guard Library
//!
//! Marks HTTP handlers (or whole groups of handlers) as requiring
//! authentication, freezes those declarations into an immutable registry,
//! and enforces them with an axum middleware.
//!
//! ```no_run
//! use axum::{http::Method, routing::get, Router};
//! use route_guard::binding::{GroupDeclaration, HandlerDeclaration};
//! use route_guard::registry::{RegistryBuilder, RegistryHandle};
//! use route_guard::security::{guard, GuardState, StaticBearerAuthenticator};
//!
//! # fn main() -> Result<(), route_guard::registry::RegistryError> {
//! let registry = RegistryBuilder::new()
//!     .group(GroupDeclaration::new("admin").secured())
//!     .handler(HandlerDeclaration::new(Method::GET, "/admin/status").in_group("admin"))
//!     .handler(HandlerDeclaration::new(Method::GET, "/health"))
//!     .build()?;
//!
//! let state = GuardState::new(
//!     RegistryHandle::new(registry),
//!     StaticBearerAuthenticator::new([("ops", "s3cr3t")]),
//! );
//! let app: Router = guard(
//!     Router::new()
//!         .route("/admin/status", get(|| async { "ok" }))
//!         .route("/health", get(|| async { "ok" })),
//!     state,
//! );
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod security;

pub use binding::{Binding, HandlerKey};
pub use config::GuardConfig;
pub use registry::{RegistryBuilder, RegistryHandle, SecurityRegistry};
