//! Workspace config file source: <root>/.cyclewalk.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// File name looked up at the walk root
pub const WORKSPACE_CONFIG_FILE: &str = ".cyclewalk.toml";

/// Add the workspace config file to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_path = root.join(WORKSPACE_CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(builder);
    }
    debug!(config_path = %config_path.display(), "Using workspace configuration");
    Ok(builder.add_source(File::from(config_path.as_path()).required(false)))
}
