//! Registry construction.
//!
//! # Responsibilities
//! - Record handler and group declarations from code and config
//! - Merge identical duplicates, reject conflicting ones
//! - Resolve each handler: own binding first, then its group's binding
//!
//! # Design Decisions
//! - Declaring never fails; problems are collected and returned by `build()`
//! - `build()` reports every error, not just the first
//! - Output is deterministic: same declarations, same registry

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::binding::{
    DeclarationSource, GroupDeclaration, GroupName, HandlerDeclaration, HandlerKey,
};
use crate::config::GuardConfig;
use crate::registry::table::SecurityRegistry;

/// A single problem found while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("handler {key} declared by {first} and {second} with different bindings or groups")]
    ConflictingHandler {
        key: HandlerKey,
        first: DeclarationSource,
        second: DeclarationSource,
    },

    #[error("group '{name}' declared by {first} and {second} with different bindings")]
    ConflictingGroup {
        name: GroupName,
        first: DeclarationSource,
        second: DeclarationSource,
    },

    #[error("handler {key} references undeclared group '{group}'")]
    UnknownGroup { key: HandlerKey, group: GroupName },

    #[error("handler {key} has a route that does not start with '/'")]
    InvalidRoute { key: HandlerKey },

    #[error("invalid HTTP method '{method}' for route {route}")]
    InvalidMethod { method: String, route: String },
}

/// Registry construction failed. Startup must not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("registry build failed: {}", join_errors(.0))]
pub struct RegistryError(pub Vec<DeclarationError>);

impl RegistryError {
    pub fn errors(&self) -> &[DeclarationError] {
        &self.0
    }
}

fn join_errors(errors: &[DeclarationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
struct Recorded<T> {
    decl: T,
    source: DeclarationSource,
}

/// Collects declarations and freezes them into a [`SecurityRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    groups: BTreeMap<GroupName, Recorded<GroupDeclaration>>,
    handlers: BTreeMap<HandlerKey, Recorded<HandlerDeclaration>>,
    errors: Vec<DeclarationError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated from a loaded configuration.
    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new().with_config(config)
    }

    /// Declare a group in code.
    pub fn group(mut self, decl: GroupDeclaration) -> Self {
        self.declare_group(decl, DeclarationSource::Code);
        self
    }

    /// Declare a handler in code.
    pub fn handler(mut self, decl: HandlerDeclaration) -> Self {
        self.declare_handler(decl, DeclarationSource::Code);
        self
    }

    /// Add every group and handler from the configuration file.
    pub fn with_config(mut self, config: &GuardConfig) -> Self {
        for group in &config.groups {
            let mut decl = GroupDeclaration::new(group.name.as_str());
            if group.secured {
                decl = decl.secured();
            }
            self.declare_group(decl, DeclarationSource::Config);
        }

        for handler in &config.handlers {
            let Some(key) = HandlerKey::parse(&handler.method, handler.route.as_str()) else {
                self.errors.push(DeclarationError::InvalidMethod {
                    method: handler.method.clone(),
                    route: handler.route.clone(),
                });
                continue;
            };

            let mut decl = HandlerDeclaration {
                key,
                binding: None,
                group: handler.group.as_deref().map(GroupName::from),
            };
            if handler.secured {
                decl = decl.secured();
            }
            self.declare_handler(decl, DeclarationSource::Config);
        }

        self
    }

    fn declare_group(&mut self, decl: GroupDeclaration, source: DeclarationSource) {
        match self.groups.get(&decl.name) {
            Some(existing) if existing.decl == decl => {
                tracing::debug!(group = %decl.name, %source, "Duplicate group declaration merged");
            }
            Some(existing) => {
                self.errors.push(DeclarationError::ConflictingGroup {
                    name: decl.name.clone(),
                    first: existing.source,
                    second: source,
                });
            }
            None => {
                self.groups
                    .insert(decl.name.clone(), Recorded { decl, source });
            }
        }
    }

    fn declare_handler(&mut self, decl: HandlerDeclaration, source: DeclarationSource) {
        match self.handlers.get(&decl.key) {
            Some(existing) if existing.decl == decl => {
                tracing::debug!(handler = %decl.key, %source, "Duplicate handler declaration merged");
            }
            Some(existing) => {
                self.errors.push(DeclarationError::ConflictingHandler {
                    key: decl.key.clone(),
                    first: existing.source,
                    second: source,
                });
            }
            None => {
                self.handlers
                    .insert(decl.key.clone(), Recorded { decl, source });
            }
        }
    }

    /// Resolve every handler and freeze the result.
    pub fn build(self) -> Result<SecurityRegistry, RegistryError> {
        let mut errors = self.errors;
        let mut table = HashMap::with_capacity(self.handlers.len());

        for (key, recorded) in &self.handlers {
            if !key.route().starts_with('/') {
                errors.push(DeclarationError::InvalidRoute { key: key.clone() });
                continue;
            }

            let inherited = match &recorded.decl.group {
                Some(group) => match self.groups.get(group) {
                    Some(g) => g.decl.binding.is_some(),
                    None => {
                        errors.push(DeclarationError::UnknownGroup {
                            key: key.clone(),
                            group: group.clone(),
                        });
                        continue;
                    }
                },
                None => false,
            };

            table.insert(key.clone(), recorded.decl.binding.is_some() || inherited);
        }

        if !errors.is_empty() {
            return Err(RegistryError(errors));
        }

        let registry = SecurityRegistry::from_table(table);
        tracing::debug!(
            handlers = registry.len(),
            protected = registry.protected_count(),
            "Security registry built"
        );
        Ok(registry)
    }
}
