//! Decoder registry
//!
//! Hands out the built-in decoder for each `DecoderFormat`.

use super::decoders::{CsvDecoder, JsonDecoder, TomlDecoder, YamlDecoder};
use super::options::DecodeOptions;
use super::types::{Decoder, DecoderFormat};
use crate::error::Result;
use crate::types::DecodedValue;

/// Fixed set of decoders, one per supported format
#[derive(Debug, Clone, Default)]
pub struct DecoderRegistry {
    json: JsonDecoder,
    yaml: YamlDecoder,
    toml: TomlDecoder,
    csv: CsvDecoder,
}

impl DecoderRegistry {
    /// Create a registry with the built-in decoders
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the decoder for a format
    pub fn get(&self, format: DecoderFormat) -> &dyn Decoder {
        match format {
            DecoderFormat::Json => &self.json,
            DecoderFormat::Yaml => &self.yaml,
            DecoderFormat::Toml => &self.toml,
            DecoderFormat::Csv => &self.csv,
        }
    }

    /// Decode `body` with the decoder for `format`
    pub fn decode(
        &self,
        format: DecoderFormat,
        body: &[u8],
        options: &DecodeOptions,
    ) -> Result<DecodedValue> {
        self.get(format).decode(body, options)
    }
}
