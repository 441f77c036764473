//! CLI output: error mapping and exit codes.

use crate::error::ApiError;

/// Command succeeded (for `check`: no cycles)
pub const EXIT_OK: i32 = 0;
/// Fatal error: bad root, bad config, unresolvable path
pub const EXIT_FAILURE: i32 = 1;
/// `check` found at least one cycle
pub const EXIT_CYCLES_FOUND: i32 = 2;

/// Rendered command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn ok(text: String) -> Self {
        Self {
            text,
            exit_code: EXIT_OK,
        }
    }

    pub fn with_code(text: String, exit_code: i32) -> Self {
        Self { text, exit_code }
    }
}

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    format!("Error: {}", e)
}
