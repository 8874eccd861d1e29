//! Format resolver implementation

use crate::decode::DecoderFormat;
use crate::error::{Error, Result};
use crate::media::MediaType;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// A `key = value` assignment or a `[table]` header on its own line
static TOML_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:\[\[?[^\[\]\n]+\]\]?\s*$|[A-Za-z0-9_.\-"']+\s*=)"#).unwrap()
});

/// A `key: value` pair or a `- item` list entry
static YAML_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:-\s|[^\s#:][^#\n]*?:(?:\s|$))").unwrap());

/// Map a declared media type to its decoder format
pub fn format_for_media_type(media_type: &MediaType) -> Option<DecoderFormat> {
    let format = match (media_type.main_type(), media_type.sub_type()) {
        ("application", "json") => DecoderFormat::Json,
        ("application" | "text", "yaml" | "x-yaml") => DecoderFormat::Yaml,
        ("application" | "text", "toml" | "x-toml") => DecoderFormat::Toml,
        ("text", "csv" | "comma-separated-values") => DecoderFormat::Csv,
        _ => match media_type.suffix()? {
            "json" => DecoderFormat::Json,
            "yaml" => DecoderFormat::Yaml,
            "toml" => DecoderFormat::Toml,
            _ => return None,
        },
    };

    Some(format)
}

/// Choose the decoder for content, preferring the declared media type
pub fn resolve(
    declared: Option<&MediaType>,
    body: &[u8],
    delimiter: char,
) -> Result<DecoderFormat> {
    match declared {
        Some(media_type) => format_for_media_type(media_type)
            .ok_or_else(|| Error::unsupported(media_type.to_string())),
        None => sniff(body, delimiter),
    }
}

/// Guess the format of content that declares no media type
pub fn sniff(body: &[u8], delimiter: char) -> Result<DecoderFormat> {
    let text = std::str::from_utf8(body)
        .map_err(|_| Error::unsupported("unable to detect format of non-UTF-8 content"))?;
    let trimmed = text.trim_start();

    if trimmed.starts_with('{') {
        trace!("sniffed json from leading brace");
        return Ok(DecoderFormat::Json);
    }

    if trimmed.starts_with('[') {
        // Valid JSON always wins; a leading TOML table header is only a fallback
        if serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_err()
            && looks_like_toml(text)
        {
            trace!("sniffed toml from leading table header");
            return Ok(DecoderFormat::Toml);
        }
        trace!("sniffed json from leading bracket");
        return Ok(DecoderFormat::Json);
    }

    if looks_like_toml(text) {
        trace!("sniffed toml");
        return Ok(DecoderFormat::Toml);
    }

    if looks_like_yaml(text) {
        trace!("sniffed yaml");
        return Ok(DecoderFormat::Yaml);
    }

    if text.contains(delimiter) {
        trace!("sniffed csv from delimiter {delimiter:?}");
        return Ok(DecoderFormat::Csv);
    }

    Err(Error::unsupported("unable to detect format of content"))
}

fn looks_like_toml(text: &str) -> bool {
    TOML_LINE.is_match(text) && text.parse::<toml::Table>().is_ok()
}

fn looks_like_yaml(text: &str) -> bool {
    YAML_LINE.is_match(text)
        && serde_yaml::from_str::<serde_yaml::Value>(text)
            .is_ok_and(|value| value.is_mapping() || value.is_sequence())
}
