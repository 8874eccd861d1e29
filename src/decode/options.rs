//! Decode options
//!
//! Normalizes the loosely-typed options map a caller passes alongside the
//! data into per-format option structs. Keys match case-insensitively and
//! unknown keys are ignored, but a recognized key with a bad value is an
//! argument error.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// CSV decoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
    /// Lines starting with this character are skipped
    pub comment: Option<char>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            comment: None,
        }
    }
}

impl CsvOptions {
    /// Create CSV options with a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }

    /// Set the comment marker
    #[must_use]
    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Check that the delimiter and comment marker are single ASCII bytes
    /// distinct from quotes, line breaks and each other
    pub fn validate(&self) -> Result<()> {
        if is_reserved(self.delimiter) {
            return Err(Error::argument(format!(
                "invalid CSV delimiter {:?}",
                self.delimiter
            )));
        }

        if let Some(comment) = self.comment {
            if is_reserved(comment) {
                return Err(Error::argument(format!(
                    "invalid CSV comment marker {comment:?}"
                )));
            }
            if comment == self.delimiter {
                return Err(Error::argument(format!(
                    "CSV comment marker and delimiter must differ, both are {comment:?}"
                )));
            }
        }

        Ok(())
    }
}

fn is_reserved(c: char) -> bool {
    !c.is_ascii() || matches!(c, '"' | '\r' | '\n')
}

/// Canonical options for every decoder family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// CSV-specific options
    pub csv: CsvOptions,
}

impl DecodeOptions {
    /// Parse an options map on top of the built-in defaults
    pub fn parse(options: Option<&JsonObject>) -> Result<Self> {
        Self::default().merge(options)
    }

    /// Parse an options map on top of `self`, returning the merged options
    pub fn merge(self, options: Option<&JsonObject>) -> Result<Self> {
        let mut merged = self;

        let Some(options) = options else {
            return Ok(merged);
        };

        for (key, value) in options {
            match key.to_ascii_lowercase().as_str() {
                "delimiter" => merged.csv.delimiter = single_char(key, value)?,
                "comment" => merged.csv.comment = optional_char(key, value)?,
                _ => trace!("ignoring unknown unmarshal option '{key}'"),
            }
        }

        merged.csv.validate()?;
        Ok(merged)
    }
}

/// Read a recognized option that must be exactly one character
fn single_char(key: &str, value: &JsonValue) -> Result<char> {
    let JsonValue::String(s) = value else {
        return Err(Error::argument(format!(
            "option '{key}' must be a single-character string, got {value}"
        )));
    };

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::argument(format!(
            "option '{key}' must be a single character, got {s:?}"
        ))),
    }
}

/// Like `single_char`, but an empty string or null clears the option
fn optional_char(key: &str, value: &JsonValue) -> Result<Option<char>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.is_empty() => Ok(None),
        _ => single_char(key, value).map(Some),
    }
}
