//! CLI domain: parse, route, output, and presentation only.
//! No traversal logic; the route table dispatches to the walker and classifier.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, CommandOutput, EXIT_CYCLES_FOUND, EXIT_FAILURE, EXIT_OK};
pub use parse::{Cli, Commands, WalkArgs};
pub use presentation::{
    format_check_result, format_report_json, format_report_text, format_resolve_json,
    format_resolve_text, format_section_heading, ResolveView,
};
pub use route::RunContext;
