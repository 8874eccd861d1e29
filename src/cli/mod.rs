//! CLI module
//!
//! Command-line interface for decoding files.
//!
//! # Commands
//!
//! - `decode` - Decode files (or stdin) and print them as JSON
//! - `formats` - List supported formats and their media types

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{decode_inputs, Input, Runner};
