//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest to
//! highest precedence:
//!
//! 1. Built-in defaults
//! 2. `<repo_root>/.foldermap.toml` (optional) or an explicit `--config` file
//! 3. `FOLDERMAP__*` environment variables (e.g. `FOLDERMAP__OUTPUT`,
//!    `FOLDERMAP__LOGGING__LEVEL`)
//!
//! CLI flags are applied on top by the caller.

use crate::error::MapError;
use crate::ignore::IgnoreRules;
use crate::logging::LoggingConfig;
use crate::metadata::Bump;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the generated document, relative to the repository root.
pub const DEFAULT_OUTPUT: &str = "docs/repo_folder_map.md";

/// Workspace config file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = ".foldermap.toml";

const ENV_PREFIX: &str = "FOLDERMAP";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMapConfig {
    /// Output document path, relative to the repository root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Bump policy applied by generate runs
    #[serde(default = "default_bump")]
    pub bump: Bump,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Extra ignore rules, added to the built-in ones
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Extra ignore rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Names excluded when they are the whole relative path
    #[serde(default)]
    pub root_names: Vec<String>,

    /// Names excluded wherever they appear as a path segment
    #[serde(default)]
    pub segments: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_bump() -> Bump {
    Bump::Patch
}

impl Default for FolderMapConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            bump: default_bump(),
            follow_symlinks: false,
            ignore: IgnoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl IgnoreConfig {
    /// Built-in rules extended with the configured names.
    pub fn to_rules(&self) -> IgnoreRules {
        IgnoreRules::default()
            .with_root_names(self.root_names.iter().cloned())
            .with_segments(self.segments.iter().cloned())
    }
}

impl FolderMapConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), MapError> {
        if self.output.as_os_str().is_empty() {
            return Err(MapError::Configuration(
                "Output path cannot be empty".to_string(),
            ));
        }
        if let Some(name) = self.ignore.root_names.iter().find(|n| n.trim().is_empty()) {
            return Err(MapError::Configuration(format!(
                "Ignore root name cannot be blank: {:?}",
                name
            )));
        }
        for segment in &self.ignore.segments {
            if segment.trim().is_empty() || segment.contains('/') {
                return Err(MapError::Configuration(format!(
                    "Ignore segment must be a single non-blank path segment: {:?}",
                    segment
                )));
            }
        }
        Ok(())
    }
}

/// Loads [`FolderMapConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a repository root; the workspace file is optional.
    pub fn load(repo_root: &Path) -> Result<FolderMapConfig, MapError> {
        let path = repo_root.join(CONFIG_FILE_NAME);
        debug!(config_path = %path.display(), exists = path.is_file(), "Loading configuration");
        let builder = builder_with_defaults()?.add_source(File::from(path).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<FolderMapConfig, MapError> {
        debug!(config_path = %path.display(), "Loading configuration file");
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<FolderMapConfig, MapError> {
        let config: FolderMapConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Create a Config builder with defaults applied.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("output", DEFAULT_OUTPUT)?
        .set_default("bump", Bump::Patch.as_str())?
        .set_default("follow_symlinks", false)
}
