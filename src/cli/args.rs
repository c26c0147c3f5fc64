//! CLI argument definitions using clap
//!
//! Commands:
//! - finplan init --config <path>
//! - finplan serve --config <path>
//! - finplan plan --input <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// finplan - personal financial guidance plans
#[derive(Parser, Debug)]
#[command(name = "finplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./finplan.json")]
        config: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./finplan.json")]
        config: PathBuf,
    },

    /// Generate a plan for a profile read as JSON and print it
    Plan {
        /// Profile JSON file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
