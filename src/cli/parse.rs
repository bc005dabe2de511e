//! CLI parse: clap types for foldermap. No behavior; definitions only.

use crate::metadata::Bump;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generate and verify a deterministic repository folder map
#[derive(Parser, Debug)]
#[command(name = "foldermap")]
#[command(version)]
#[command(about = "Generate and verify a deterministic repository folder map")]
pub struct Cli {
    /// Repository root path
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Generated map output path, relative to repo root (default: docs/repo_folder_map.md)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Semantic version bump strategy for map metadata (default: patch)
    #[arg(long, value_enum)]
    pub bump: Option<BumpArg>,

    /// Reason summary to store in metadata
    #[arg(long)]
    pub summary: Option<String>,

    /// Check for drift without writing
    #[arg(long)]
    pub check: bool,

    /// Configuration file path (overrides <repo-root>/.foldermap.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Bump policy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BumpArg {
    None,
    Patch,
    Minor,
    Major,
}

impl From<BumpArg> for Bump {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::None => Bump::None,
            BumpArg::Patch => Bump::Patch,
            BumpArg::Minor => Bump::Minor,
            BumpArg::Major => Bump::Major,
        }
    }
}
