//! Environment source: CYCLEWALK__WALKER__MAX_LINK_HOPS=8 style overrides.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CYCLEWALK")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("walker.ignore_patterns")
            .try_parsing(true),
    )
}
