//! CLI domain: parse, route, output, and presentation only.
//! No tree or metadata logic; the route dispatches to the workspace service.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_CONFIG, EXIT_DRIFT, EXIT_FAILURE, EXIT_OK};
pub use parse::{BumpArg, Cli};
pub use presentation::{format_check_outcome, format_generate_outcome, CommandOutput};
pub use route::{load_config, RunContext, RunReport};
