//! Command line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Normalize traffic-violation records into classifier features
#[derive(Parser, Debug, Clone)]
#[command(name = "violation-pipeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PipelineArgs {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long, env = "VIOLATIONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Produce the frozen feature table
    Features {
        /// JSON array of raw violation rows
        input: PathBuf,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Produce the feature table plus correlation diagnostics
    Analyze {
        /// JSON array of raw violation rows
        input: PathBuf,
        /// Feature table output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Correlation report output file
        #[arg(short, long)]
        matrix: Option<PathBuf>,
    },
}

impl PipelineArgs {
    /// Log level override implied by `-v` flags
    pub fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}
