//! CLI route: single route table and run context. Dispatches to the walker,
//! the classifier, and presentation.

use crate::cli::output::{CommandOutput, EXIT_CYCLES_FOUND, EXIT_FAILURE, EXIT_OK};
use crate::cli::parse::{Cli, Commands, WalkArgs};
use crate::cli::presentation::{
    format_check_result, format_report_json, format_report_text, format_resolve_json,
    format_resolve_text, ResolveView,
};
use crate::config::{ConfigLoader, CycleWalkConfig, OutputConfig};
use crate::error::ApiError;
use crate::tree::classifier::{Classifier, Resolution};
use crate::tree::fs::FileSystem;
use crate::tree::report::WalkReport;
use crate::tree::walker::{CycleWalker, WalkerConfig};
use std::path::Path;
use tracing::debug;

/// Runtime context for CLI execution: the merged configuration and
/// terminal capabilities.
pub struct RunContext {
    config: CycleWalkConfig,
    color: bool,
}

impl RunContext {
    pub fn new(config: CycleWalkConfig) -> Self {
        Self {
            config,
            color: false,
        }
    }

    /// Load configuration for `cli`: an explicit `--config` file, else the
    /// layered sources for the command's root.
    pub fn load(cli: &Cli) -> Result<Self, ApiError> {
        let config = match cli.config {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(cli.command.config_root())?,
        };
        Ok(Self::new(config))
    }

    /// Enable ANSI styling in text output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &CycleWalkConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Scan {
                walk,
                format,
                show_visited,
            } => self.handle_scan(walk, format.as_deref(), *show_visited),
            Commands::Check { walk } => self.handle_check(walk),
            Commands::Resolve {
                path,
                max_hops,
                format,
            } => self.handle_resolve(path, *max_hops, format.as_deref()),
            Commands::Config { .. } => Ok(CommandOutput::ok(self.config.to_toml()?)),
        }
    }

    fn handle_scan(
        &self,
        walk: &WalkArgs,
        format: Option<&str>,
        show_visited: bool,
    ) -> Result<CommandOutput, ApiError> {
        let output = self.output_config(format, show_visited)?;
        let report = self.run_walk(walk)?;
        let text = match output.format.as_str() {
            "json" => format_report_json(&report)?,
            _ => format_report_text(&report, output.show_visited, self.color),
        };
        Ok(CommandOutput::ok(text))
    }

    fn handle_check(&self, walk: &WalkArgs) -> Result<CommandOutput, ApiError> {
        let report = self.run_walk(walk)?;
        if report.has_cycles() {
            Ok(CommandOutput::with_code(
                format_check_result(&report),
                EXIT_CYCLES_FOUND,
            ))
        } else {
            Ok(CommandOutput::ok(String::new()))
        }
    }

    fn handle_resolve(
        &self,
        path: &Path,
        max_hops: Option<usize>,
        format: Option<&str>,
    ) -> Result<CommandOutput, ApiError> {
        let output = self.output_config(format, false)?;
        let mut walker_config = self.config.walker.clone();
        if let Some(hops) = max_hops {
            walker_config.max_link_hops = hops;
        }
        walker_config.validate().map_err(ApiError::ConfigError)?;

        let walker = CycleWalker::with_config(walker_config);
        let view = resolve_view(&walker.classifier(), path);
        let text = match output.format.as_str() {
            "json" => format_resolve_json(&view)?,
            _ => format_resolve_text(&view),
        };
        let exit_code = if view.is_error() { EXIT_FAILURE } else { EXIT_OK };
        Ok(CommandOutput::with_code(text, exit_code))
    }

    fn output_config(&self, format: Option<&str>, show_visited: bool) -> Result<OutputConfig, ApiError> {
        let mut output = self.config.output.clone();
        if let Some(format) = format {
            output.format = format.to_string();
        }
        output.show_visited |= show_visited;
        output.validate().map_err(ApiError::ConfigError)?;
        Ok(output)
    }

    fn walker_config(&self, walk: &WalkArgs) -> Result<WalkerConfig, ApiError> {
        let mut config = self.config.walker.clone();
        walk.apply(&mut config);
        config.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }

    fn run_walk(&self, walk: &WalkArgs) -> Result<WalkReport, ApiError> {
        let config = self.walker_config(walk)?;
        debug!(?config, root = %walk.root.display(), "Running walk");
        Ok(CycleWalker::with_config(config).walk(&walk.root)?)
    }
}

/// Classify and resolve one path, folding any failure into the view.
fn resolve_view<F: FileSystem + ?Sized>(classifier: &Classifier<'_, F>, path: &Path) -> ResolveView {
    let mut view = ResolveView {
        path: path.to_path_buf(),
        kind: None,
        link_target: None,
        resolution: None,
        identity: None,
        error_kind: None,
        error: None,
    };

    let entry = match classifier.classify(path) {
        Ok(entry) => entry,
        Err(e) => {
            view.error_kind = Some(e.kind());
            view.error = Some(e.to_string());
            return view;
        }
    };
    view.kind = Some(entry.kind);
    view.link_target = entry.link_target.clone();

    match classifier.resolve(&entry) {
        Ok(Resolution::File) => {
            view.resolution = Some("file");
            view.identity = classifier.canonicalize(path).ok();
        }
        Ok(Resolution::Directory { identity }) => {
            view.resolution = Some("directory");
            view.identity = Some(identity);
        }
        Ok(Resolution::SymlinkToDirectory { identity, .. }) => {
            view.resolution = Some("symlink_to_directory");
            view.identity = Some(identity);
        }
        Ok(Resolution::SymlinkToFile { identity, .. }) => {
            view.resolution = Some("symlink_to_file");
            view.identity = Some(identity);
        }
        Ok(Resolution::SymlinkBroken { error, .. }) => {
            view.resolution = Some("symlink_broken");
            view.error_kind = Some(error.kind());
            view.error = Some(error.to_string());
        }
        Err(e) => {
            view.error_kind = Some(e.kind());
            view.error = Some(e.to_string());
        }
    }
    view
}
