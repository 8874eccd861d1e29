//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use super::options::DecodeOptions;
use crate::error::Result;
use crate::media::MediaType;
use crate::types::DecodedValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format handled by a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
    /// CSV
    Csv,
}

impl DecoderFormat {
    /// Every supported format
    pub const ALL: [DecoderFormat; 4] = [
        DecoderFormat::Json,
        DecoderFormat::Yaml,
        DecoderFormat::Toml,
        DecoderFormat::Csv,
    ];

    /// Lowercase format name
    pub fn name(self) -> &'static str {
        match self {
            DecoderFormat::Json => "json",
            DecoderFormat::Yaml => "yaml",
            DecoderFormat::Toml => "toml",
            DecoderFormat::Csv => "csv",
        }
    }

    /// Canonical media type for this format
    pub fn media_type(self) -> MediaType {
        match self {
            DecoderFormat::Json => MediaType::json(),
            DecoderFormat::Yaml => MediaType::yaml(),
            DecoderFormat::Toml => MediaType::toml(),
            DecoderFormat::Csv => MediaType::csv(),
        }
    }

    /// Whether decoding produces rows rather than a nested value
    pub fn is_tabular(self) -> bool {
        matches!(self, DecoderFormat::Csv)
    }
}

impl fmt::Display for DecoderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Trait for decoding raw content into a generic value
pub trait Decoder: Send + Sync {
    /// Format this decoder understands
    fn format(&self) -> DecoderFormat;

    /// Decode the full content into a single value
    fn decode(&self, body: &[u8], options: &DecodeOptions) -> Result<DecodedValue>;
}
