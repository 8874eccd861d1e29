//! Common types used throughout Solidafy Unmarshal
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// CSV rows: ordered records of ordered fields
pub type Rows = Vec<Vec<String>>;

// ============================================================================
// Decoded Value
// ============================================================================

/// Result of a successful decode.
///
/// The shape is fixed by the decoder that produced it: JSON, YAML and TOML
/// yield [`DecodedValue::Data`], CSV yields [`DecodedValue::Rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Nested generic value (usually a mapping)
    Data(JsonValue),
    /// Record-oriented rows of string fields
    Rows(Rows),
}

impl DecodedValue {
    /// Borrow the top-level mapping, if this value is one
    pub fn as_map(&self) -> Option<&JsonObject> {
        match self {
            DecodedValue::Data(JsonValue::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Borrow the generic value, if this is not a row set
    pub fn as_data(&self) -> Option<&JsonValue> {
        match self {
            DecodedValue::Data(value) => Some(value),
            DecodedValue::Rows(_) => None,
        }
    }

    /// Borrow the CSV rows, if this is a row set
    pub fn as_rows(&self) -> Option<&Rows> {
        match self {
            DecodedValue::Rows(rows) => Some(rows),
            DecodedValue::Data(_) => None,
        }
    }

    /// Look up a top-level key in a mapping value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_map()?.get(key)
    }

    /// Convert into a plain JSON value (rows become an array of string arrays)
    pub fn to_json(&self) -> JsonValue {
        match self {
            DecodedValue::Data(value) => value.clone(),
            DecodedValue::Rows(rows) => JsonValue::Array(
                rows.iter()
                    .map(|row| {
                        JsonValue::Array(row.iter().cloned().map(JsonValue::String).collect())
                    })
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
