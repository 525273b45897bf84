//! Binding declarations.
//!
//! # Data Model
//! ```text
//! GroupDeclaration   (name, Option<Binding>)
//!     ▲ in_group
//!     │
//! HandlerDeclaration (HandlerKey, Option<Binding>, Option<GroupName>)
//! ```
//!
//! # Design Decisions
//! - A binding is presence-only: there is no "unbind" marker
//! - Handler identity is method + route template, never the concrete path
//! - Declarations are plain values; resolution happens in the registry

use std::cmp::Ordering;
use std::fmt;

use axum::http::Method;

/// Marks a handler or group as requiring authentication.
///
/// The tag has no payload. A declaration either carries one or it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Binding;

/// Stable identity of a handler: HTTP method plus route template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    method: Method,
    route: String,
}

impl HandlerKey {
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
        }
    }

    /// Parse a method name (case-insensitive) and pair it with a route.
    pub fn parse(method: &str, route: impl Into<String>) -> Option<Self> {
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes()).ok()?;
        Some(Self::new(method, route))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn route(&self) -> &str {
        &self.route
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.route)
    }
}

// Method has no Ord; order by route first so listings group by path.
impl Ord for HandlerKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.route
            .cmp(&other.route)
            .then_with(|| self.method.as_str().cmp(other.method.as_str()))
    }
}

impl PartialOrd for HandlerKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Name of an enclosing handler group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GroupName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for GroupName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Where a declaration was made. Used when reporting conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationSource {
    Code,
    Config,
}

impl fmt::Display for DeclarationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationSource::Code => f.write_str("code"),
            DeclarationSource::Config => f.write_str("config"),
        }
    }
}

/// Declaration of a group of handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDeclaration {
    pub name: GroupName,
    pub binding: Option<Binding>,
}

impl GroupDeclaration {
    pub fn new(name: impl Into<GroupName>) -> Self {
        Self {
            name: name.into(),
            binding: None,
        }
    }

    pub fn secured(mut self) -> Self {
        self.binding = Some(Binding);
        self
    }
}

/// Declaration of a single handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDeclaration {
    pub key: HandlerKey,
    pub binding: Option<Binding>,
    pub group: Option<GroupName>,
}

impl HandlerDeclaration {
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            key: HandlerKey::new(method, route),
            binding: None,
            group: None,
        }
    }

    /// Attach a binding to this handler.
    pub fn secured(mut self) -> Self {
        self.binding = Some(Binding);
        self
    }

    /// Place this handler inside an enclosing group.
    pub fn in_group(mut self, group: impl Into<GroupName>) -> Self {
        self.group = Some(group.into());
        self
    }
}
