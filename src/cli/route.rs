//! CLI route: run context built from parsed flags and configuration.
//! Dispatches to the workspace service and hands results to presentation.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_check_outcome, format_generate_outcome, CommandOutput};
use crate::config::{ConfigLoader, FolderMapConfig};
use crate::error::MapError;
use crate::metadata::Bump;
use crate::tree::WalkerConfig;
use crate::workspace::{
    CheckOutcome, GenerateOutcome, GenerateRequest, MapWorkspace, WorkspaceOptions,
};
use tracing::debug;

/// Load configuration for the CLI: the explicit `--config` file if given,
/// otherwise the optional workspace file under `--repo-root`.
pub fn load_config(cli: &Cli) -> Result<FolderMapConfig, MapError> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.repo_root),
    }
}

/// Outcome of one CLI run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Generated(GenerateOutcome),
    Checked(CheckOutcome),
}

impl RunReport {
    pub fn present(&self) -> CommandOutput {
        match self {
            RunReport::Generated(outcome) => format_generate_outcome(outcome),
            RunReport::Checked(outcome) => format_check_outcome(outcome),
        }
    }
}

/// Runtime context for CLI execution: validated workspace plus resolved settings.
pub struct RunContext {
    workspace: MapWorkspace,
    bump: Bump,
}

impl RunContext {
    /// Resolve settings (flag > environment > config file > default) and
    /// validate the workspace. `config` comes from [`load_config`]; nothing is
    /// written here.
    pub fn new(cli: &Cli, config: FolderMapConfig) -> Result<Self, MapError> {
        let output = cli.output.clone().unwrap_or_else(|| config.output.clone());
        let bump = cli.bump.map(Bump::from).unwrap_or(config.bump);
        let walker = WalkerConfig {
            follow_symlinks: cli.follow_symlinks || config.follow_symlinks,
        };
        debug!(
            output = %output.display(),
            bump = %bump,
            follow_symlinks = walker.follow_symlinks,
            "Resolved run settings"
        );

        let workspace = MapWorkspace::open(
            &cli.repo_root,
            WorkspaceOptions {
                output,
                rules: config.ignore.to_rules(),
                walker,
            },
        )?;

        Ok(Self { workspace, bump })
    }

    pub fn workspace(&self) -> &MapWorkspace {
        &self.workspace
    }

    /// Run generate or check mode.
    pub fn execute(&self, cli: &Cli) -> Result<RunReport, MapError> {
        if cli.check {
            let outcome = self.workspace.check(cli.summary.as_deref())?;
            return Ok(RunReport::Checked(outcome));
        }

        let outcome = self.workspace.generate(&GenerateRequest {
            bump: self.bump,
            summary: cli.summary.clone(),
        })?;
        Ok(RunReport::Generated(outcome))
    }
}
