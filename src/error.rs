//! Error types for Solidafy Unmarshal
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! `Error` is `Clone` so that a failed decode can be stored in the result
//! cache and handed back to every later caller asking for the same key.

use thiserror::Error;

/// The main error type for Solidafy Unmarshal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Call Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    Argument { message: String },

    // ============================================================================
    // Content Errors
    // ============================================================================
    #[error("Failed to read content '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to decode {format}: {message}")]
    Decode { format: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {message}")]
    Io { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create a read error for the content identified by `key`
    pub fn read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a decode error
    pub fn decode(format: impl ToString, message: impl Into<String>) -> Self {
        Self::Decode {
            format: format.to_string(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrong arity or argument type on the call itself
    pub fn is_argument(&self) -> bool {
        matches!(self, Error::Argument { .. })
    }

    /// Content stream could not be fully consumed
    pub fn is_read(&self) -> bool {
        matches!(self, Error::Read { .. })
    }

    /// No decoder for the declared or sniffed format
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Error::UnsupportedFormat { .. })
    }

    /// Content did not conform to the chosen decoder's grammar
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Whether this failure describes the content itself and may be cached
    /// under the content's identity key.
    pub fn is_cacheable(&self) -> bool {
        self.is_decode() || self.is_unsupported_format()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for Solidafy Unmarshal
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
