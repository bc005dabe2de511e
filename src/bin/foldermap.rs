//! Foldermap CLI Binary
//!
//! Command-line interface for generating and checking repository folder maps.

use clap::Parser;
use foldermap::cli::{exit_code, load_config, map_error, Cli, RunContext};
use foldermap::config::FolderMapConfig;
use foldermap::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    // Load the layered config once; logging comes up first so that a broken
    // config file is still reported through it.
    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, config.as_ref().ok());

    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(exit_code(&e));
    }

    debug!("foldermap starting");

    let context = match config.and_then(|config| RunContext::new(&cli, config)) {
        Ok(ctx) => {
            debug!(output = %ctx.workspace().display_name(), "CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error initializing workspace: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    match context.execute(&cli) {
        Ok(report) => {
            let output = report.present();
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args and the loaded config file.
/// Precedence: CLI flags override config file override defaults. Without a
/// usable config the defaults apply.
fn build_logging_config(cli: &Cli, file_config: Option<&FolderMapConfig>) -> LoggingConfig {
    let mut config = file_config.map(|c| c.logging.clone()).unwrap_or_default();

    if cli.quiet {
        config.level = "off".to_string();
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

    config
}
