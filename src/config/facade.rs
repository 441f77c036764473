//! Config loader: assembles the layered sources into a validated config.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::CycleWalkConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`CycleWalkConfig`] from defaults, files, and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the layered configuration for a walk rooted at `root`.
    pub fn load(root: &Path) -> Result<CycleWalkConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder);

        let config: CycleWalkConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load a single explicit file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<CycleWalkConfig, ApiError> {
        debug!(config_path = %path.display(), "Loading configuration file");
        let config: CycleWalkConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: CycleWalkConfig) -> Result<CycleWalkConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
