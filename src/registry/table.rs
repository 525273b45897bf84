//! Frozen handler → protection table.

use std::collections::HashMap;

use axum::http::Method;

use crate::binding::HandlerKey;

/// Immutable mapping from handler identity to protection status.
///
/// Built once by [`RegistryBuilder`](super::RegistryBuilder); shared via `Arc`
/// and read from any number of threads without synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRegistry {
    handlers: HashMap<HandlerKey, bool>,
}

impl SecurityRegistry {
    pub(crate) fn from_table(handlers: HashMap<HandlerKey, bool>) -> Self {
        Self { handlers }
    }

    /// An empty registry. Every lookup resolves to `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the handler carries a binding, directly or through its group.
    pub fn is_protected(&self, key: &HandlerKey) -> bool {
        self.handlers.get(key).copied().unwrap_or(false)
    }

    /// Verdict for a request about to be dispatched to `route`.
    ///
    /// The router answers `HEAD` with the `GET` handler, so `HEAD` is
    /// protected whenever `GET` on the same route is.
    pub fn is_protected_route(&self, method: &Method, route: &str) -> bool {
        if self.is_protected(&HandlerKey::new(method.clone(), route)) {
            return true;
        }
        *method == Method::HEAD && self.is_protected(&HandlerKey::new(Method::GET, route))
    }

    /// String convenience. An unparseable method is never protected.
    pub fn lookup(&self, method: &str, route: &str) -> bool {
        HandlerKey::parse(method, route)
            .map(|key| self.is_protected_route(key.method(), key.route()))
            .unwrap_or(false)
    }

    pub fn contains(&self, key: &HandlerKey) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered handlers with their status, sorted by key.
    pub fn entries(&self) -> Vec<(&HandlerKey, bool)> {
        let mut entries: Vec<_> = self.handlers.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Protected handlers, sorted by key.
    pub fn protected_handlers(&self) -> impl Iterator<Item = &HandlerKey> {
        self.entries()
            .into_iter()
            .filter(|(_, protected)| *protected)
            .map(|(key, _)| key)
    }

    pub fn protected_count(&self) -> usize {
        self.handlers.values().filter(|p| **p).count()
    }
}
