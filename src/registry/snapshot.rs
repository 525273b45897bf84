//! Atomically replaceable registry snapshot.
//!
//! # Design Decisions
//! - Readers `load()` an `Arc` and keep a consistent view for the whole request
//! - Reload replaces the whole registry; there is no in-place mutation
//! - Handle is cheap to clone and shared across all request tasks

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::Method;

use crate::binding::HandlerKey;
use crate::observability::metrics;
use crate::registry::table::SecurityRegistry;

/// Shared handle to the live [`SecurityRegistry`].
#[derive(Clone)]
pub struct RegistryHandle {
    inner: Arc<ArcSwap<SecurityRegistry>>,
}

impl RegistryHandle {
    pub fn new(registry: SecurityRegistry) -> Self {
        metrics::set_protected_handlers(registry.protected_count());
        Self {
            inner: Arc::new(ArcSwap::from_pointee(registry)),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<SecurityRegistry> {
        self.inner.load_full()
    }

    pub fn is_protected(&self, key: &HandlerKey) -> bool {
        self.inner.load().is_protected(key)
    }

    pub fn is_protected_route(&self, method: &Method, route: &str) -> bool {
        self.inner.load().is_protected_route(method, route)
    }

    /// Publish a new registry, returning the one it replaced.
    pub fn replace(&self, registry: SecurityRegistry) -> Arc<SecurityRegistry> {
        let protected = registry.protected_count();
        let handlers = registry.len();
        let previous = self.inner.swap(Arc::new(registry));
        metrics::set_protected_handlers(protected);
        tracing::info!(handlers, protected, "Security registry replaced");
        previous
    }
}

impl std::fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("handlers", &self.inner.load().len())
            .finish()
    }
}
