//! End-to-end behavior of the enforcement middleware on an axum router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    routing::get,
    Extension, Router,
};
use tower::ServiceExt;

use route_guard::registry::{RegistryHandle, SecurityRegistry};
use route_guard::security::{guard, GuardState, Principal, StaticBearerAuthenticator};

mod common;

async fn whoami(Extension(principal): Extension<Principal>) -> String {
    principal.label
}

fn app(state: GuardState) -> Router {
    guard(
        Router::new()
            .route("/a", get(|| async { "a" }))
            .route("/b", get(whoami))
            .route("/c", get(whoami))
            .route("/unregistered", get(|| async { "free" })),
        state,
    )
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_open_handler_skips_authenticator() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry, auth.clone()));

    let res = app.clone().oneshot(get_request("/a")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.oneshot(get_request("/unregistered")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(auth.calls(), 0);
}

#[tokio::test]
async fn test_protected_handler_requires_credentials() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry, auth.clone()));

    for path in ["/b", "/c"] {
        let res = app.clone().oneshot(get_request(path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
    assert_eq!(auth.calls(), 2);
}

#[tokio::test]
async fn test_head_on_protected_get_requires_credentials() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry, auth.clone()));

    for path in ["/b", "/c"] {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "HEAD {path}");
    }
    assert_eq!(auth.calls(), 2);

    // HEAD on an open GET route still goes straight through.
    let req = Request::builder()
        .method(Method::HEAD)
        .uri("/a")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(auth.calls(), 2);
}

#[tokio::test]
async fn test_principal_reaches_handler() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry, auth));

    let req = Request::builder()
        .uri("/c")
        .header("x-test-user", "alice")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "alice");
}

#[tokio::test]
async fn test_bearer_authenticator_end_to_end() {
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(
        registry,
        StaticBearerAuthenticator::new([("ops", "s3cr3t")]),
    ));

    let res = app.clone().oneshot(get_request("/b")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    assert!(body_text(res).await.contains("missing Authorization header"));

    let req = Request::builder()
        .uri("/b")
        .header(header::AUTHORIZATION, "Bearer s3cr3t")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "ops");
}

#[tokio::test]
async fn test_registry_swap_takes_effect_on_next_request() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry.clone(), auth));

    let res = app.clone().oneshot(get_request("/b")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    registry.replace(SecurityRegistry::empty());

    // No longer intercepted: the handler runs and fails to find a Principal.
    let res = app.oneshot(get_request("/b")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_path_is_not_intercepted() {
    let auth = common::CountingAuthenticator::default();
    let registry = RegistryHandle::new(common::scenario_builder().build().unwrap());
    let app = app(GuardState::new(registry, auth.clone()));

    let res = app.oneshot(get_request("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(auth.calls(), 0);
}
