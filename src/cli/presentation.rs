//! CLI presentation: text formatters for generate and check outcomes.

use crate::cli::output::{EXIT_DRIFT, EXIT_OK};
use crate::drift::DriftReport;
use crate::workspace::{CheckOutcome, GenerateOutcome};

/// Text destined for each stream plus the process exit code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

pub fn format_generate_outcome(outcome: &GenerateOutcome) -> CommandOutput {
    CommandOutput {
        stdout: format!(
            "Wrote folder map: {}\nmap_version={}\nsummary={}\n",
            outcome.output, outcome.metadata.version, outcome.metadata.summary
        ),
        stderr: String::new(),
        exit_code: EXIT_OK,
    }
}

/// Status lines go to stderr on failure; the diff itself goes to stdout so it
/// can be piped on its own.
pub fn format_check_outcome(outcome: &CheckOutcome) -> CommandOutput {
    match &outcome.report {
        DriftReport::UpToDate => CommandOutput {
            stdout: format!("Repo map is up to date: {}\n", outcome.output),
            stderr: String::new(),
            exit_code: EXIT_OK,
        },
        DriftReport::Missing => CommandOutput {
            stdout: String::new(),
            stderr: format!("Map file missing: {}\n", outcome.output),
            exit_code: EXIT_DRIFT,
        },
        DriftReport::Differs { diff } => CommandOutput {
            stdout: diff.clone(),
            stderr: format!("Repo map drift detected: {}\n", outcome.output),
            exit_code: EXIT_DRIFT,
        },
    }
}
