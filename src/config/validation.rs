//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject blank names and tokens
//! - Check the log level is one `tracing` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - Cross-declaration checks (conflicts, unknown groups) belong to the registry builder

use thiserror::Error;

use crate::config::schema::GuardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error("group #{0} has an empty name")]
    EmptyGroupName(usize),

    #[error("handler #{0} has an empty route")]
    EmptyRoute(usize),

    #[error("auth token '{0}' is empty")]
    EmptyToken(String),

    #[error("auth token label must not be empty")]
    EmptyTokenLabel,
}

pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (i, group) in config.groups.iter().enumerate() {
        if group.name.trim().is_empty() {
            errors.push(ValidationError::EmptyGroupName(i));
        }
    }

    for (i, handler) in config.handlers.iter().enumerate() {
        if handler.route.trim().is_empty() {
            errors.push(ValidationError::EmptyRoute(i));
        }
    }

    for (label, token) in &config.auth.tokens {
        if label.trim().is_empty() {
            errors.push(ValidationError::EmptyTokenLabel);
        }
        if token.is_empty() {
            errors.push(ValidationError::EmptyToken(label.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
