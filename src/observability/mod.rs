//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Any `metrics` recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (handler, outcome, principal)
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
