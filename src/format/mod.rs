//! Format resolution module
//!
//! Decides which decoder handles a piece of content.
//!
//! # Overview
//!
//! A declared media type is mapped through a fixed table. Content without a
//! declared type is sniffed: JSON by its opening bracket, then TOML, YAML and
//! CSV by shape, trying a parse where two formats look alike.

mod resolver;

pub use resolver::{format_for_media_type, resolve, sniff};
