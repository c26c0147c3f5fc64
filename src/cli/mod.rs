//! CLI module for finplan
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Boot the services and serve the HTTP API
//! - plan: One-shot plan generation from a profile document

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_state, init, plan, run, run_command, serve};
pub use config::{AppConfig, BootstrapAdmin};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_profile, read_profile, write_json};
