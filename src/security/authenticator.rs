//! Credential checks invoked for protected handlers.

use std::collections::HashMap;

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::config::AuthConfig;

/// Identity attached to a request that passed authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub label: String,
}

/// Why a request to a protected handler was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,

    #[error("malformed Authorization header")]
    MalformedCredentials,

    #[error("credentials rejected")]
    Rejected,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": StatusCode::UNAUTHORIZED.as_u16(),
                "message": self.to_string(),
            }
        });
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

/// Decides whether a request's credentials are acceptable.
///
/// Only consulted for handlers the registry reports as protected.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError>;
}

/// Accepts `Authorization: Bearer <token>` for a fixed set of tokens.
#[derive(Clone, Default)]
pub struct StaticBearerAuthenticator {
    // token -> label
    tokens: HashMap<String, String>,
}

impl StaticBearerAuthenticator {
    pub fn new<L, T>(tokens: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(label, token)| (token.into(), label.into()))
                .collect(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.tokens.iter().map(|(l, t)| (l.as_str(), t.as_str())))
    }
}

impl std::fmt::Debug for StaticBearerAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticBearerAuthenticator")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl Authenticator for StaticBearerAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?
            .to_str()
            .map_err(|_| AuthError::MalformedCredentials)?;

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedCredentials)?;

        self.tokens
            .get(token)
            .map(|label| Principal {
                label: label.clone(),
            })
            .ok_or(AuthError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_accepts_known_token() {
        let auth = StaticBearerAuthenticator::new([("ops", "s3cr3t")]);
        let principal = auth.authenticate(&headers("Bearer s3cr3t")).unwrap();
        assert_eq!(principal.label, "ops");
    }

    #[test]
    fn test_rejections() {
        let auth = StaticBearerAuthenticator::new([("ops", "s3cr3t")]);
        assert_eq!(
            auth.authenticate(&HeaderMap::new()),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            auth.authenticate(&headers("Basic b3BzOnMzY3IzdA==")),
            Err(AuthError::MalformedCredentials)
        );
        assert_eq!(
            auth.authenticate(&headers("Bearer ")),
            Err(AuthError::MalformedCredentials)
        );
        assert_eq!(
            auth.authenticate(&headers("Bearer wrong")),
            Err(AuthError::Rejected)
        );
    }

    #[test]
    fn test_rejection_response() {
        let response = AuthError::Rejected.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
