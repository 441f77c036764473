//! CLI presentation: text and json formatters per command family.

mod report;
mod resolve;
mod shared;

pub use report::{format_check_result, format_report_json, format_report_text};
pub use resolve::{format_resolve_json, format_resolve_text, ResolveView};
pub use shared::format_section_heading;
