//! Content source module
//!
//! Normalizes a call argument into decodable content.
//!
//! # Overview
//!
//! The source module provides:
//! - `Arg` - A loosely-typed call argument (JSON value, raw bytes, or resource)
//! - `ContentResource` - A handle that can open a byte stream, report its
//!   media type and name itself with a stable key
//! - `StringResource` / `FileResource` - In-memory and file-backed resources
//! - `Source` / `Content` - The identity key plus, once read, the bytes and
//!   declared media type

mod resource;
mod types;

pub use resource::{ContentResource, FileResource, StringResource};
pub use types::{Arg, Content, Source};
