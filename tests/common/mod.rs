//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{HeaderMap, Method};
use route_guard::binding::{GroupDeclaration, HandlerDeclaration};
use route_guard::registry::RegistryBuilder;
use route_guard::security::{AuthError, Authenticator, Principal};

/// Handler set used across the suite:
/// A open in an open group, B bound directly, C inheriting from a bound group.
pub fn scenario_builder() -> RegistryBuilder {
    RegistryBuilder::new()
        .group(GroupDeclaration::new("g"))
        .group(GroupDeclaration::new("g2").secured())
        .handler(HandlerDeclaration::new(Method::GET, "/a").in_group("g"))
        .handler(HandlerDeclaration::new(Method::GET, "/b").secured())
        .handler(HandlerDeclaration::new(Method::GET, "/c").in_group("g2"))
}

/// Authenticator that records how often it was asked.
#[derive(Clone, Default)]
pub struct CountingAuthenticator {
    pub calls: Arc<AtomicUsize>,
}

impl CountingAuthenticator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for CountingAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match headers.get("x-test-user").and_then(|v| v.to_str().ok()) {
            Some(user) => Ok(Principal {
                label: user.to_string(),
            }),
            None => Err(AuthError::MissingCredentials),
        }
    }
}
