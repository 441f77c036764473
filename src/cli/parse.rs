//! CLI parse: clap types for cyclewalk. No behavior beyond flag merging.

use crate::tree::walker::WalkerConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Cyclewalk CLI - walk directory trees and report symlink loops
#[derive(Parser, Debug)]
#[command(name = "cyclewalk", version)]
#[command(about = "Walk directory trees, follow symbolic links, and report loops")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Walk root and traversal overrides shared by scan and check
#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    /// Directory to walk
    pub root: PathBuf,

    /// Report symbolic links without following them
    #[arg(long)]
    pub no_follow: bool,

    /// Deepest directory level whose entries are listed (root = 0)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Link hops allowed when resolving a single path
    #[arg(long)]
    pub max_hops: Option<usize>,

    /// Entry name to skip (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,
}

impl WalkArgs {
    /// Layer these flags over a loaded walker config.
    pub fn apply(&self, config: &mut WalkerConfig) {
        if self.no_follow {
            config.follow_symlinks = false;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = Some(depth);
        }
        if let Some(hops) = self.max_hops {
            config.max_link_hops = hops;
        }
        for pattern in &self.ignore {
            if !config.ignore_patterns.contains(pattern) {
                config.ignore_patterns.push(pattern.clone());
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a tree and print every cycle and entry failure found
    Scan {
        #[command(flatten)]
        walk: WalkArgs,
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
        /// Also list every visited entry
        #[arg(long)]
        show_visited: bool,
    },
    /// Walk a tree and exit with status 2 if any cycle is found
    Check {
        #[command(flatten)]
        walk: WalkArgs,
    },
    /// Show how a single path classifies and resolves
    Resolve {
        /// Path to inspect
        path: PathBuf,
        /// Link hops allowed while resolving
        #[arg(long)]
        max_hops: Option<usize>,
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Directory whose workspace config file should be included
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

impl Commands {
    /// Directory searched for the workspace config file.
    pub fn config_root(&self) -> &Path {
        match self {
            Commands::Scan { walk, .. } | Commands::Check { walk } => walk.root.as_path(),
            Commands::Resolve { .. } => Path::new("."),
            Commands::Config { root } => root.as_path(),
        }
    }
}
