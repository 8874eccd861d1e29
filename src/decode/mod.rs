//! Content decoder module
//!
//! Supports: JSON, YAML, TOML, CSV
//!
//! # Overview
//!
//! The decode module provides one decoder per supported format behind the
//! `Decoder` trait, a fixed `DecoderRegistry` that hands them out by
//! `DecoderFormat`, and the option parser that turns a loosely-typed options
//! map into `DecodeOptions`.

mod decoders;
mod options;
mod registry;
mod types;

pub use decoders::{CsvDecoder, JsonDecoder, TomlDecoder, YamlDecoder};
pub use options::{CsvOptions, DecodeOptions};
pub use registry::DecoderRegistry;
pub use types::{Decoder, DecoderFormat};

#[cfg(test)]
mod tests;
