//! Media type value
//!
//! Defines `MediaType` and the extension table.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A media type such as `application/json` or `application/ld+json`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    /// Top-level type (e.g., "application")
    main_type: String,
    /// Full subtype including any structured suffix (e.g., "ld+json")
    sub_type: String,
    /// Structured syntax suffix (e.g., "json" for "ld+json")
    suffix: Option<String>,
}

/// Extension to media type essence
const EXTENSIONS: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("toml", "application/toml"),
    ("csv", "text/csv"),
    ("ics", "text/calendar"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
];

impl MediaType {
    /// Create a media type from its two halves
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        let main_type = main_type.into().to_ascii_lowercase();
        let sub_type = sub_type.into().to_ascii_lowercase();
        let suffix = sub_type
            .rsplit_once('+')
            .map(|(_, suffix)| suffix.to_string())
            .filter(|s| !s.is_empty());

        Self {
            main_type,
            sub_type,
            suffix,
        }
    }

    /// Parse a media type string, ignoring parameters such as `charset`
    pub fn parse(s: &str) -> Result<Self> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        let (main, sub) = essence
            .split_once('/')
            .ok_or_else(|| Error::argument(format!("invalid media type '{s}'")))?;

        if main.is_empty() || sub.is_empty() || sub.contains('/') {
            return Err(Error::argument(format!("invalid media type '{s}'")));
        }

        Ok(Self::new(main, sub))
    }

    /// `application/json`
    pub fn json() -> Self {
        Self::new("application", "json")
    }

    /// `application/yaml`
    pub fn yaml() -> Self {
        Self::new("application", "yaml")
    }

    /// `application/toml`
    pub fn toml() -> Self {
        Self::new("application", "toml")
    }

    /// `text/csv`
    pub fn csv() -> Self {
        Self::new("text", "csv")
    }

    /// `text/calendar`
    pub fn calendar() -> Self {
        Self::new("text", "calendar")
    }

    /// `text/html`
    pub fn html() -> Self {
        Self::new("text", "html")
    }

    /// `application/xml`
    pub fn xml() -> Self {
        Self::new("application", "xml")
    }

    /// `text/plain`
    pub fn text() -> Self {
        Self::new("text", "plain")
    }

    /// Look up a media type by file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .and_then(|(_, essence)| Self::parse(essence).ok())
    }

    /// Look up a media type from a path's extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Top-level type
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    /// Subtype, including any suffix
    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    /// Structured syntax suffix, if any
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// `type/subtype` without parameters
    pub fn essence(&self) -> String {
        format!("{}/{}", self.main_type, self.sub_type)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.sub_type)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
