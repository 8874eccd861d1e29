//! Unmarshaler configuration
//!
//! Defaults applied to every call before per-call options, loadable from
//! YAML:
//!
//! ```yaml
//! csv:
//!   delimiter: ";"
//!   comment: "#"
//! sniff_content: true
//! ```

use crate::decode::{CsvOptions, DecodeOptions};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for an `Unmarshaler`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnmarshalConfig {
    /// Default CSV options; per-call options override them
    pub csv: CsvOptions,

    /// Guess the format of content that declares no media type
    pub sniff_content: bool,
}

impl Default for UnmarshalConfig {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            sniff_content: true,
        }
    }
}

impl UnmarshalConfig {
    /// Parse a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse unmarshal config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check that the defaults are usable
    pub fn validate(&self) -> Result<()> {
        self.csv
            .validate()
            .map_err(|e| Error::config(format!("Invalid csv defaults: {e}")))
    }

    /// Options every call starts from
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions { csv: self.csv }
    }
}
