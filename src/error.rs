//! Error types for browsing context management.
//!
//! Lookups never fail: a missing service or an unknown context name is an
//! absent result. Errors only come from the crate edges (settings, logging)
//! and from sandbox-restricted target creation.

use crate::context::{ContextId, SandboxFlag};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    #[error("Navigation from {context} to target '{target}' blocked by sandbox flag '{flag}'")]
    NavigationBlocked {
        context: ContextId,
        target: String,
        flag: SandboxFlag,
    },
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::ConfigError(err.to_string())
    }
}
