//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Credentials accepted by the bundled bearer authenticator.
    pub auth: AuthConfig,

    /// Handler groups (the enclosing "type" of a set of handlers).
    pub groups: Vec<GroupConfig>,

    /// Individual handler declarations.
    pub handlers: Vec<HandlerConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Bearer token configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted tokens keyed by a label identifying the caller.
    pub tokens: BTreeMap<String, String>,
}

/// A named group of handlers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GroupConfig {
    pub name: String,

    /// Every handler in the group is protected unless it says otherwise.
    #[serde(default)]
    pub secured: bool,
}

/// A single handler.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HandlerConfig {
    /// HTTP method (case-insensitive).
    pub method: String,

    /// Route template as registered with the router (e.g. "/certs/{id}").
    pub route: String,

    /// Enclosing group, if any.
    #[serde(default)]
    pub group: Option<String>,

    /// Binding declared directly on the handler.
    #[serde(default)]
    pub secured: bool,
}
