//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::MapError;

/// Success, or a check that found the map up to date.
pub const EXIT_OK: i32 = 0;

/// A check found the map missing or out of date.
pub const EXIT_DRIFT: i32 = 1;

/// Walk, read, write, or version arithmetic failure.
pub const EXIT_FAILURE: i32 = 1;

/// Invalid repository root, output path, configuration, or logging setup;
/// nothing was written.
pub const EXIT_CONFIG: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &MapError) -> String {
    e.to_string()
}

/// Process exit code for a failed run.
pub fn exit_code(e: &MapError) -> i32 {
    match e {
        MapError::Configuration(_) | MapError::Logging(_) => EXIT_CONFIG,
        MapError::Tree(_) | MapError::Metadata(_) | MapError::Io { .. } => EXIT_FAILURE,
    }
}
