//! Enforcement middleware.
//! Consults the registry and authenticates requests to protected handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::binding::HandlerKey;
use crate::observability::metrics::{self, Outcome};
use crate::registry::RegistryHandle;
use crate::security::authenticator::Authenticator;

/// State required by [`secured_middleware`].
#[derive(Clone)]
pub struct GuardState {
    pub registry: RegistryHandle,
    pub authenticator: Arc<dyn Authenticator>,
}

impl GuardState {
    pub fn new(registry: RegistryHandle, authenticator: impl Authenticator + 'static) -> Self {
        Self {
            registry,
            authenticator: Arc::new(authenticator),
        }
    }
}

/// Install with `Router::route_layer` (see [`guard`]) so the matched route template is available.
pub async fn secured_middleware(
    State(state): State<GuardState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // No matched route means the fallback is handling it; nothing is declared there.
    let key = req
        .extensions()
        .get::<MatchedPath>()
        .map(|route| HandlerKey::new(req.method().clone(), route.as_str()));
    let Some(key) = key else {
        metrics::record_request(Outcome::Open);
        return next.run(req).await;
    };

    if !state.registry.is_protected_route(key.method(), key.route()) {
        metrics::record_request(Outcome::Open);
        return next.run(req).await;
    }

    match state.authenticator.authenticate(req.headers()) {
        Ok(principal) => {
            tracing::debug!(handler = %key, principal = %principal.label, "Request authenticated");
            metrics::record_request(Outcome::Allowed);
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(handler = %key, reason = %e, "Rejected unauthenticated request");
            metrics::record_request(Outcome::Rejected);
            e.into_response()
        }
    }
}

/// Wrap every route of `router` with the interceptor and request tracing.
pub fn guard<S>(router: Router<S>, state: GuardState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route_layer(middleware::from_fn_with_state(state, secured_middleware))
        .layer(TraceLayer::new_for_http())
}
