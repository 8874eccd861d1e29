// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Unmarshal
//!
//! Format-agnostic unmarshaling: hand it a string, some bytes, or a resource
//! with a declared media type, and get back a decoded value. Results are
//! memoized by content identity so repeated requests skip re-parsing.
//!
//! ## Features
//!
//! - **Four formats**: JSON, YAML, TOML and CSV behind one `Decoder` trait
//! - **Media-type routing**: resources declare their type, bare strings are sniffed
//! - **CSV options**: delimiter and comment marker, matched case-insensitively
//! - **Shared cache**: one decode per key, failures included, safe across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use solidafy_unmarshal::{Arg, Unmarshaler};
//! use serde_json::json;
//!
//! let unmarshaler = Unmarshaler::default();
//!
//! let value = unmarshaler.unmarshal(&[Arg::from(r#"slogan = "Hugo Rocks!""#)]).unwrap();
//! assert_eq!(value.get("slogan"), Some(&json!("Hugo Rocks!")));
//!
//! let rows = unmarshaler
//!     .unmarshal(&[Arg::from(json!({"delimiter": ";"})), Arg::from("a;b;c")])
//!     .unwrap();
//! assert_eq!(rows.as_rows().unwrap()[0], vec!["a", "b", "c"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                Unmarshaler::unmarshal([options,] data)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴───┬──────────────┬───────────────┐
//! │   Source   │       Format        │    Decode    │     Cache     │
//! ├────────────┼─────────────────────┼──────────────┼───────────────┤
//! │ String     │ Media type table    │ JSON  YAML   │ Key → Result  │
//! │ Bytes      │ Content sniffing    │ TOML  CSV    │ Clear         │
//! │ Resource   │                     │ Options      │ Hit/miss stats│
//! └────────────┴─────────────────────┴──────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Media type parsing
pub mod media;

/// Call arguments and content-bearing resources
pub mod source;

/// Decoders (JSON, YAML, TOML, CSV) and their options
pub mod decode;

/// Format resolution and sniffing
pub mod format;

/// Decode result cache
pub mod cache;

/// Unmarshal entry point
pub mod unmarshal;

/// Unmarshaler configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use cache::{CacheStats, ResultCache};
pub use config::UnmarshalConfig;
pub use decode::{DecodeOptions, DecoderFormat};
pub use media::MediaType;
pub use source::{Arg, ContentResource, FileResource, StringResource};
pub use unmarshal::{DecodeHook, Unmarshaler};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
