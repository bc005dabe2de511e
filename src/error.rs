//! Error types for folder map generation and drift checking.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking the directory tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to read directory {path:?}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// Errors parsing a single metadata value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("Invalid map version: {0:?} (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    #[error("Invalid bump: {0:?} (must be none, patch, minor or major)")]
    InvalidBump(String),

    #[error("Map version {0:?} has a component larger than {}", u64::MAX)]
    VersionOutOfRange(String),

    #[error("Cannot apply {bump} bump to map version {version}: component would overflow")]
    VersionOverflow { version: String, bump: &'static str },
}

/// Service-level errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum MapError {
    /// Invalid repository root or output path; reported before any write.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl MapError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for MapError {
    fn from(err: config::ConfigError) -> Self {
        MapError::Configuration(err.to_string())
    }
}
