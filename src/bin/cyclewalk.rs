//! Cyclewalk CLI Binary
//!
//! Command-line interface for the cycle-aware filesystem walker.

use clap::Parser;
use cyclewalk::cli::{map_error, Cli, RunContext, EXIT_FAILURE};
use cyclewalk::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let context = match RunContext::load(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    let logging_config = build_logging_config(&cli, &context.config().logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    let context = context.with_color(color_enabled());
    match context.execute(&cli.command) {
        Ok(output) => {
            debug!(exit_code = output.exit_code, "Command completed");
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Styled output only on a terminal, and never when NO_COLOR is set.
fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Build logging configuration from CLI args over the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, loaded: &LoggingConfig) -> LoggingConfig {
    let mut config = loaded.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
