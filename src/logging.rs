//! Logging System
//!
//! Structured logging using the `tracing` crate. Logs always go to stderr;
//! stdout is reserved for command output so it can be piped or diffed.

use crate::error::MapError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full `EnvFilter` directive; wins over config.
pub const LOG_ENV: &str = "FOLDERMAP_LOG";

/// Environment variable overriding the output format.
pub const LOG_FORMAT_ENV: &str = "FOLDERMAP_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Initialize the global subscriber
///
/// Priority order (highest to lowest):
/// 1. `FOLDERMAP_LOG` / `FOLDERMAP_LOG_FORMAT` environment variables
/// 2. The given config (already merged from CLI flags and config file)
/// 3. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), MapError> {
    let filter = build_env_filter(config)?;
    let format = match std::env::var(LOG_FORMAT_ENV) {
        Ok(format) => parse_format(&format)?,
        Err(_) => parse_format(&config.format)?,
    };

    let base_subscriber = Registry::default().with(filter);
    let result = match format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| MapError::Logging(format!("Failed to install subscriber: {}", e)))
}

/// Build the level filter from the environment or config
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, MapError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    parse_level(&config.level)?;
    Ok(EnvFilter::new(&config.level))
}

fn parse_level(level: &str) -> Result<(), MapError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(MapError::Logging(format!(
            "Invalid log level: {} (must be trace, debug, info, warn, error or off)",
            level
        ))),
    }
}

pub fn parse_format(format: &str) -> Result<LogFormat, MapError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(MapError::Logging(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ))),
    }
}
