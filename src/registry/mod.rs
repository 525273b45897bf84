//! Binding registry subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     HandlerDeclaration[] + GroupDeclaration[]   (code and/or config)
//!     → builder.rs (record, detect conflicts)
//!     → build(): resolve own binding, fall back to group binding
//!     → SecurityRegistry (frozen)
//!
//! Request time:
//!     snapshot.rs (load current Arc<SecurityRegistry>)
//!     → table.rs is_protected(HandlerKey) → bool
//!
//! Reload:
//!     new SecurityRegistry built off to the side
//!     → snapshot.rs replace() (atomic swap of the whole table)
//! ```
//!
//! # Design Decisions
//! - Registry is immutable after build (lock-free reads)
//! - Unknown handler resolves to "not protected"
//! - All declaration errors are reported together, before any traffic

pub mod builder;
pub mod snapshot;
pub mod table;

pub use builder::{DeclarationError, RegistryBuilder, RegistryError};
pub use snapshot::RegistryHandle;
pub use table::SecurityRegistry;
