//! Configuration System
//!
//! Settings that shape context families: the sandbox applied to auxiliary
//! contexts opened through target selection, whether name lookup may fall
//! back to the family group, and logging. Loaded from layered TOML files and
//! environment variables by [`ConfigLoader`].
//!
//! The injected service list is not part of this file-based configuration;
//! see [`crate::service::Configuration`].

use crate::context::{Sandbox, SandboxFlag};
use crate::error::ContextError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BctxConfig {
    /// Sandbox flags applied to every auxiliary context opened by target
    /// selection
    #[serde(default)]
    pub default_sandbox: Vec<SandboxFlag>,

    /// Scan the family group when ancestry search fails
    #[serde(default = "default_true")]
    pub group_fallback: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

impl Default for BctxConfig {
    fn default() -> Self {
        Self {
            default_sandbox: Vec::new(),
            group_fallback: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Sandbox(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Sandbox(msg) => write!(f, "Sandbox: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl BctxConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for flag in &self.default_sandbox {
            if !seen.insert(flag) {
                errors.push(ValidationError::Sandbox(format!(
                    "Duplicate flag '{}' in default_sandbox",
                    flag
                )));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert into the settings shared by a context family.
    pub fn settings(&self) -> Result<Settings, ContextError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ContextError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Settings {
            default_sandbox: self.default_sandbox.iter().copied().collect(),
            group_fallback: self.group_fallback,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ContextError> {
        toml::to_string_pretty(self)
            .map_err(|e| ContextError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}

/// Runtime settings shared by every context of one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_sandbox: Sandbox,
    pub group_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_sandbox: Sandbox::NONE,
            group_fallback: true,
        }
    }
}
