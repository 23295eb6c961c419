//! Configuration loading entry point.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::BctxConfig;
use config::{ConfigError, Environment, File};
use std::path::Path;
use tracing::debug;

/// Loads [`BctxConfig`] from layered sources.
///
/// Precedence (lowest to highest): built-in defaults, global config file,
/// workspace config files, `BCTX__`-prefixed environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(workspace_root: &Path) -> Result<BctxConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config: BctxConfig = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load a single file on top of the built-in defaults, ignoring the
    /// global file, workspace files and environment.
    pub fn load_from_file(path: &Path) -> Result<BctxConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("BCTX")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("default_sandbox")
            .try_parsing(true)
    }
}
