//! Merge rules: defaults every later source is layered over.

use crate::tree::path::DEFAULT_MAX_LINK_HOPS;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("walker.follow_symlinks", true)?
        .set_default("walker.max_link_hops", DEFAULT_MAX_LINK_HOPS as u64)?
        .set_default("output.format", "text")?
        .set_default("output.show_visited", false)
}
