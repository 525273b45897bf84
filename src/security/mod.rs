//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (after route matching):
//!     → interceptor.rs (method + matched route → HandlerKey)
//!     → registry is_protected(HandlerKey)?
//!         no  → pass to handler
//!         yes → authenticator.rs (check credentials)
//!                 ok  → attach Principal, pass to handler
//!                 err → 401 Unauthorized
//! ```
//!
//! # Design Decisions
//! - Fail closed: a protected handler is never reached without a Principal
//! - Open handlers never touch the authenticator
//! - Credential checking is pluggable behind the `Authenticator` trait

pub mod authenticator;
pub mod interceptor;

pub use authenticator::{AuthError, Authenticator, Principal, StaticBearerAuthenticator};
pub use interceptor::{guard, secured_middleware, GuardState};
