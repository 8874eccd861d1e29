//! Content-bearing resources
//!
//! A resource supplies a byte stream, a media type and an identity key.

use crate::error::{Error, Result};
use crate::media::MediaType;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// A handle to content with a declared media type and a stable identity key
pub trait ContentResource: Send + Sync + fmt::Debug {
    /// Open a fresh read stream over the content
    fn open(&self) -> Result<Box<dyn Read + '_>>;

    /// Media type the resource declares for its content
    fn media_type(&self) -> MediaType;

    /// Key that uniquely names this content for caching
    fn key(&self) -> String;
}

// ============================================================================
// String Resource
// ============================================================================

/// In-memory resource backed by a string
#[derive(Debug, Clone)]
pub struct StringResource {
    key: String,
    content: String,
    media_type: MediaType,
}

impl StringResource {
    /// Create a resource from its key, content and media type
    pub fn new(key: impl Into<String>, content: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            media_type,
        }
    }
}

impl ContentResource for StringResource {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.content.as_bytes())))
    }

    fn media_type(&self) -> MediaType {
        self.media_type.clone()
    }

    fn key(&self) -> String {
        self.key.clone()
    }
}

// ============================================================================
// File Resource
// ============================================================================

/// Resource backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
    media_type: MediaType,
}

impl FileResource {
    /// Create a file resource, inferring the media type from the extension
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = MediaType::from_path(path).ok_or_else(|| {
            Error::unsupported(format!(
                "cannot infer media type of '{}' from its extension",
                path.display()
            ))
        })?;

        Ok(Self::with_media_type(path, media_type))
    }

    /// Create a file resource with an explicit media type
    pub fn with_media_type(path: impl AsRef<Path>, media_type: MediaType) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            media_type,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentResource for FileResource {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        let file = File::open(&self.path).map_err(|e| Error::read(self.key(), e.to_string()))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn media_type(&self) -> MediaType {
        self.media_type.clone()
    }

    fn key(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
