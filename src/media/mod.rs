//! Media type module
//!
//! Parses and names the media types that content resources declare.
//!
//! # Overview
//!
//! The media module provides:
//! - `MediaType` - A parsed `type/subtype[+suffix]` value with parameters stripped
//! - Built-in constructors for the types this crate knows about
//! - Lookup by file extension for file-backed resources

mod types;

pub use types::MediaType;
