//! Call argument and content types
//!
//! Turns a call argument into an identity key and, on demand, the full
//! content bytes plus the media type the argument declared.

use super::resource::ContentResource;
use crate::error::{Error, Result};
use crate::media::MediaType;
use crate::types::{JsonObject, JsonValue};
use bytes::Bytes;
use std::borrow::Cow;
use std::io::Read;
use std::sync::Arc;

// ============================================================================
// Call Argument
// ============================================================================

/// A single loosely-typed argument to `Unmarshaler::unmarshal`
#[derive(Debug, Clone)]
pub enum Arg {
    /// Any JSON-like value: strings are decodable data, objects are options
    Value(JsonValue),
    /// Raw bytes holding UTF-8 text
    Bytes(Bytes),
    /// A content-bearing resource
    Resource(Arc<dyn ContentResource>),
}

impl Arg {
    /// Wrap a resource
    pub fn resource(resource: impl ContentResource + 'static) -> Self {
        Self::Resource(Arc::new(resource))
    }

    /// Short type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Value(JsonValue::Null) => "null",
            Arg::Value(JsonValue::Bool(_)) => "bool",
            Arg::Value(JsonValue::Number(_)) => "number",
            Arg::Value(JsonValue::String(_)) => "string",
            Arg::Value(JsonValue::Array(_)) => "array",
            Arg::Value(JsonValue::Object(_)) => "map",
            Arg::Bytes(_) => "bytes",
            Arg::Resource(_) => "resource",
        }
    }

    /// Borrow the argument as an options map
    pub fn as_options(&self) -> Option<&JsonObject> {
        match self {
            Arg::Value(JsonValue::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Value(JsonValue::String(s.to_string()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Value(JsonValue::String(s))
    }
}

impl From<JsonValue> for Arg {
    fn from(value: JsonValue) -> Self {
        Self::Value(value)
    }
}

impl From<JsonObject> for Arg {
    fn from(map: JsonObject) -> Self {
        Self::Value(JsonValue::Object(map))
    }
}

impl From<Bytes> for Arg {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<Arc<dyn ContentResource>> for Arg {
    fn from(resource: Arc<dyn ContentResource>) -> Self {
        Self::Resource(resource)
    }
}

// ============================================================================
// Source
// ============================================================================

/// A data argument that has been accepted as decodable
#[derive(Debug)]
pub enum Source<'a> {
    /// Raw text: the text is its own identity key
    Raw { key: &'a str },
    /// A resource, read lazily
    Resource(&'a dyn ContentResource),
}

impl<'a> Source<'a> {
    /// Accept a data argument, rejecting anything that is not a string,
    /// UTF-8 bytes or a resource. `position` is the 1-based argument index.
    pub fn from_arg(arg: &'a Arg, position: usize) -> Result<Self> {
        match arg {
            Arg::Value(JsonValue::String(s)) => Ok(Source::Raw { key: s.as_str() }),
            Arg::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(|key| Source::Raw { key })
                .map_err(|e| {
                    Error::argument(format!(
                        "argument {position}: byte data is not valid UTF-8: {e}"
                    ))
                }),
            Arg::Resource(resource) => Ok(Source::Resource(resource.as_ref())),
            other => Err(Error::argument(format!(
                "argument {position}: cannot unmarshal data of type {}",
                other.type_name()
            ))),
        }
    }

    /// Identity key used for caching
    pub fn key(&self) -> Cow<'a, str> {
        match self {
            Source::Raw { key } => Cow::Borrowed(*key),
            Source::Resource(resource) => Cow::Owned(resource.key()),
        }
    }

    /// Read the full content
    pub fn read(&self) -> Result<Content<'a>> {
        match self {
            Source::Raw { key } => {
                let key: &'a str = *key;
                Ok(Content {
                    key: Cow::Borrowed(key),
                    bytes: Cow::Borrowed(key.as_bytes()),
                    media_type: None,
                })
            }
            Source::Resource(resource) => {
                let key = resource.key();
                let mut bytes = Vec::new();
                {
                    let mut reader = resource.open().map_err(|e| match e {
                        Error::Read { .. } => e,
                        other => Error::read(key.clone(), other.to_string()),
                    })?;
                    reader
                        .read_to_end(&mut bytes)
                        .map_err(|e| Error::read(key.clone(), e.to_string()))?;
                }

                Ok(Content {
                    key: Cow::Owned(key),
                    bytes: Cow::Owned(bytes),
                    media_type: Some(resource.media_type()),
                })
            }
        }
    }
}

// ============================================================================
// Content
// ============================================================================

/// Fully read content ready for format resolution
#[derive(Debug, Clone)]
pub struct Content<'a> {
    /// Identity key
    pub key: Cow<'a, str>,
    /// Raw content
    pub bytes: Cow<'a, [u8]>,
    /// Media type declared by the source, if any
    pub media_type: Option<MediaType>,
}
