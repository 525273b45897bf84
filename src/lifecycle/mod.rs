//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build registry → Publish snapshot
//!
//! Reload (reload.rs):
//!     New config → Build registry off to the side → Atomic swap
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT → Trigger broadcast → Background tasks exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Registry is complete before any traffic is accepted
//! - A failed reload never disturbs the live snapshot

pub mod reload;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, StartupError};
