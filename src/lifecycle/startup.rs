//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Merge code declarations with config declarations
//! - Build and publish the initial registry
//!
//! # Design Decisions
//! - Fail fast: configuration and declaration errors refuse startup
//! - Registry is published only once fully built

use std::path::Path;

use thiserror::Error;

use crate::config::{load_config, ConfigError, GuardConfig};
use crate::registry::{RegistryBuilder, RegistryError, RegistryHandle};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Load `path`, combine it with the code declarations in `base`, and publish the result.
pub fn start(
    path: &Path,
    base: RegistryBuilder,
) -> Result<(GuardConfig, RegistryHandle), StartupError> {
    let config = load_config(path)?;

    tracing::info!(
        path = ?path,
        groups = config.groups.len(),
        handlers = config.handlers.len(),
        "Configuration loaded"
    );

    let registry = base.with_config(&config).build()?;

    tracing::info!(
        handlers = registry.len(),
        protected = registry.protected_count(),
        "Security registry ready"
    );

    Ok((config, RegistryHandle::new(registry)))
}
