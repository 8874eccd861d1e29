//! Decoder implementations
//!
//! Each decoder handles a specific content format.

use super::options::{CsvOptions, DecodeOptions};
use super::types::{Decoder, DecoderFormat};
use crate::error::{Error, Result};
use crate::types::{DecodedValue, JsonObject, JsonValue, Rows};
use std::borrow::Cow;

/// Borrow the body as UTF-8 text, failing as a decode error of `format`
fn utf8(format: DecoderFormat, body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body)
        .map_err(|e| Error::decode(format, format!("content is not valid UTF-8: {e}")))
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Json
    }

    fn decode(&self, body: &[u8], _options: &DecodeOptions) -> Result<DecodedValue> {
        serde_json::from_slice(body)
            .map(DecodedValue::Data)
            .map_err(|e| Error::decode(DecoderFormat::Json, e.to_string()))
    }
}

// ============================================================================
// YAML Decoder
// ============================================================================

/// YAML decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    /// Create a new YAML decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for YamlDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Yaml
    }

    fn decode(&self, body: &[u8], _options: &DecodeOptions) -> Result<DecodedValue> {
        let text = utf8(DecoderFormat::Yaml, body)?;

        // An empty document is an empty mapping rather than null
        if text.trim().is_empty() {
            return Ok(DecodedValue::Data(JsonValue::Object(JsonObject::new())));
        }

        let value: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| Error::decode(DecoderFormat::Yaml, e.to_string()))?;

        yaml_to_json(value).map(DecodedValue::Data)
    }
}

/// Convert a YAML value into a JSON value, stringifying scalar mapping keys
pub(crate) fn yaml_to_json(value: serde_yaml::Value) -> Result<JsonValue> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => JsonValue::Null,
        Yaml::Bool(b) => JsonValue::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => JsonValue::String(s),
        Yaml::Sequence(seq) => JsonValue::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut obj = JsonObject::new();
            for (k, v) in mapping {
                obj.insert(yaml_key(k)?, yaml_to_json(v)?);
            }
            JsonValue::Object(obj)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        JsonValue::Number(u.into())
    } else {
        // NaN and infinities have no JSON representation
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(JsonValue::Null, JsonValue::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(Error::decode(
            DecoderFormat::Yaml,
            "mapping keys must be scalars",
        )),
    }
}

// ============================================================================
// TOML Decoder
// ============================================================================

/// TOML decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDecoder;

impl TomlDecoder {
    /// Create a new TOML decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for TomlDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Toml
    }

    fn decode(&self, body: &[u8], _options: &DecodeOptions) -> Result<DecodedValue> {
        let text = utf8(DecoderFormat::Toml, body)?;
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| {
                Error::decode(DecoderFormat::Toml, e.to_string().trim())
            })?;

        Ok(DecodedValue::Data(toml_to_json(toml::Value::Table(table))))
    }
}

/// Convert a TOML value into a JSON value; datetimes become RFC 3339 strings
pub(crate) fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(JsonValue::Null, JsonValue::Number),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(arr) => JsonValue::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

// ============================================================================
// CSV Decoder
// ============================================================================

/// CSV decoder producing rows of string fields
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDecoder;

impl CsvDecoder {
    /// Create a new CSV decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for CsvDecoder {
    fn format(&self) -> DecoderFormat {
        DecoderFormat::Csv
    }

    fn decode(&self, body: &[u8], options: &DecodeOptions) -> Result<DecodedValue> {
        let text = utf8(DecoderFormat::Csv, body)?;
        parse_csv(text, &options.csv).map(DecodedValue::Rows)
    }
}

/// Parse CSV text into rows.
///
/// Comment lines are removed before field splitting, so a marker counts even
/// when indented. Blank lines are skipped and rows may differ in length.
fn parse_csv(body: &str, options: &CsvOptions) -> Result<Rows> {
    let text = strip_comment_lines(body, options.comment);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(csv_byte("delimiter", options.delimiter)?)
        .comment(
            options
                .comment
                .map(|c| csv_byte("comment", c))
                .transpose()?,
        )
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::decode(DecoderFormat::Csv, e.to_string()))?;
        if starts_blank_line(&text, &record) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Drop lines whose first non-whitespace character is the comment marker
fn strip_comment_lines(body: &str, comment: Option<char>) -> Cow<'_, str> {
    match comment {
        Some(marker) if body.contains(marker) => Cow::Owned(
            body.split_inclusive('\n')
                .filter(|line| !line.trim_start().starts_with(marker))
                .collect(),
        ),
        _ => Cow::Borrowed(body),
    }
}

/// Whether a record begins on a whitespace-only line
fn starts_blank_line(text: &str, record: &csv::StringRecord) -> bool {
    record
        .position()
        .and_then(|pos| text.get(pos.byte() as usize..))
        .and_then(|rest| rest.lines().next())
        .is_some_and(|line| line.trim().is_empty())
}

/// The csv reader works on single bytes
fn csv_byte(name: &str, c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| Error::argument(format!("CSV {name} must be an ASCII character, got {c:?}")))
}
