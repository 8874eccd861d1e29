//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Unmarshal CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-unmarshal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Unmarshal configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode files and print each as JSON
    Decode {
        /// Files to decode ("-" or none reads stdin)
        files: Vec<PathBuf>,

        /// Media type to use instead of guessing from the extension or content
        #[arg(short, long)]
        media_type: Option<String>,

        /// CSV field delimiter
        #[arg(short, long)]
        delimiter: Option<String>,

        /// CSV comment marker
        #[arg(long)]
        comment: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List supported formats
    Formats,
}
