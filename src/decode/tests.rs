//! Tests for decoder module

use super::*;
use crate::types::DecodedValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|f| (*f).to_string()).collect())
        .collect()
}

fn csv(body: &str, options: &DecodeOptions) -> crate::error::Result<Vec<Vec<String>>> {
    match CsvDecoder::new().decode(body.as_bytes(), options)? {
        DecodedValue::Rows(rows) => Ok(rows),
        DecodedValue::Data(v) => panic!("expected rows, got {v}"),
    }
}

// ============================================================================
// DecoderFormat Tests
// ============================================================================

#[test]
fn test_decoder_format_names() {
    assert_eq!(DecoderFormat::Json.to_string(), "json");
    assert_eq!(DecoderFormat::Yaml.name(), "yaml");
    assert_eq!(DecoderFormat::Toml.media_type().to_string(), "application/toml");
    assert_eq!(DecoderFormat::Csv.media_type().to_string(), "text/csv");
}

#[test]
fn test_decoder_format_tabular() {
    assert!(DecoderFormat::Csv.is_tabular());
    assert!(!DecoderFormat::Json.is_tabular());
}

#[test]
fn test_decoder_format_serde() {
    let format: DecoderFormat = serde_json::from_str(r#""toml""#).unwrap();
    assert_eq!(format, DecoderFormat::Toml);
}

// ============================================================================
// Option Parser Tests
// ============================================================================

#[test]
fn test_options_default() {
    let options = DecodeOptions::parse(None).unwrap();
    assert_eq!(options.csv.delimiter, ',');
    assert_eq!(options.csv.comment, None);
}

#[test_case("delimiter" ; "lowercase")]
#[test_case("Delimiter" ; "capitalized")]
#[test_case("DElimiter" ; "mixed case")]
fn test_options_case_insensitive(key: &str) {
    let map = json!({ key: ";" });
    let options = DecodeOptions::parse(map.as_object()).unwrap();
    assert_eq!(options.csv.delimiter, ';');
}

#[test]
fn test_options_comment() {
    let map = json!({"Comment": "%", "delimiter": "\t"});
    let options = DecodeOptions::parse(map.as_object()).unwrap();
    assert_eq!(options.csv, CsvOptions::with_delimiter('\t').with_comment('%'));
}

#[test]
fn test_options_empty_comment_clears() {
    let map = json!({"comment": ""});
    let defaults = DecodeOptions {
        csv: CsvOptions::default().with_comment('#'),
    };
    let options = defaults.merge(map.as_object()).unwrap();
    assert_eq!(options.csv.comment, None);
}

#[test]
fn test_options_unknown_keys_ignored() {
    let map = json!({"delimter": 42, "lazyQuotes": true});
    let options = DecodeOptions::parse(map.as_object()).unwrap();
    assert_eq!(options, DecodeOptions::default());
}

#[test_case(json!({"delimiter": ";;"}) ; "multi char delimiter")]
#[test_case(json!({"delimiter": ""}) ; "empty delimiter")]
#[test_case(json!({"delimiter": 59}) ; "numeric delimiter")]
#[test_case(json!({"comment": ["#"]}) ; "array comment")]
#[test_case(json!({"delimiter": "\""}) ; "quote delimiter")]
#[test_case(json!({"delimiter": "\n"}) ; "newline delimiter")]
#[test_case(json!({"delimiter": ";", "comment": ";"}) ; "comment equals delimiter")]
#[test_case(json!({"delimiter": "§"}) ; "non ascii delimiter")]
#[test_case(json!({"comment": "é"}) ; "non ascii comment")]
fn test_options_invalid_values(map: serde_json::Value) {
    let err = DecodeOptions::parse(map.as_object()).unwrap_err();
    assert!(err.is_argument(), "unexpected error: {err}");
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_object() {
    let value = JsonDecoder::new()
        .decode(br#"{ "slogan": "Hugo Rocks!" }"#, &DecodeOptions::default())
        .unwrap();
    assert_eq!(value.get("slogan"), Some(&json!("Hugo Rocks!")));
}

#[test]
fn test_json_decoder_nested() {
    let body = br#"{"root": {"GlossDiv": {"GlossSeeAlso": ["GML", "XML"]}}}"#;
    let value = JsonDecoder::new()
        .decode(body, &DecodeOptions::default())
        .unwrap();
    assert_eq!(
        value.get("root").unwrap()["GlossDiv"]["GlossSeeAlso"],
        json!(["GML", "XML"])
    );
}

#[test]
fn test_json_decoder_array() {
    let value = JsonDecoder::new()
        .decode(b"[1, 2, 3]", &DecodeOptions::default())
        .unwrap();
    assert_eq!(value, DecodedValue::Data(json!([1, 2, 3])));
}

#[test_case(b"{ notjson }" ; "unquoted key")]
#[test_case(b"{\"a\": [1, 2}" ; "depth mismatch")]
#[test_case(b"" ; "empty")]
fn test_json_decoder_invalid(body: &[u8]) {
    let err = JsonDecoder::new()
        .decode(body, &DecodeOptions::default())
        .unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("json"));
}

// ============================================================================
// YAML Decoder Tests
// ============================================================================

#[test]
fn test_yaml_decoder_mapping() {
    let value = YamlDecoder::new()
        .decode(br#"slogan: "Hugo Rocks!""#, &DecodeOptions::default())
        .unwrap();
    assert_eq!(value.get("slogan"), Some(&json!("Hugo Rocks!")));
}

#[test]
fn test_yaml_decoder_nested_and_scalars() {
    let body = b"server:\n  port: 8080\n  tls: true\n  ratio: 0.5\n  hosts:\n    - a\n    - b\n";
    let value = YamlDecoder::new()
        .decode(body, &DecodeOptions::default())
        .unwrap();
    assert_eq!(
        value,
        DecodedValue::Data(json!({
            "server": {"port": 8080, "tls": true, "ratio": 0.5, "hosts": ["a", "b"]}
        }))
    );
}

#[test]
fn test_yaml_decoder_scalar_keys_stringified() {
    let value = YamlDecoder::new()
        .decode(b"1: one\ntrue: yes\n", &DecodeOptions::default())
        .unwrap();
    assert_eq!(value, DecodedValue::Data(json!({"1": "one", "true": "yes"})));
}

#[test]
fn test_yaml_decoder_empty_document() {
    let value = YamlDecoder::new()
        .decode(b"  \n", &DecodeOptions::default())
        .unwrap();
    assert_eq!(value, DecodedValue::Data(json!({})));
}

#[test]
fn test_yaml_decoder_invalid() {
    let err = YamlDecoder::new()
        .decode(b"key: [unclosed", &DecodeOptions::default())
        .unwrap_err();
    assert!(err.is_decode());
}

// ============================================================================
// TOML Decoder Tests
// ============================================================================

#[test]
fn test_toml_decoder_simple() {
    let value = TomlDecoder::new()
        .decode(br#"slogan = "Hugo Rocks!""#, &DecodeOptions::default())
        .unwrap();
    assert_eq!(value.get("slogan"), Some(&json!("Hugo Rocks!")));
}

#[test]
fn test_toml_decoder_tables_and_datetime() {
    let body = br#"
title = "example"

[owner]
name = "Tom"
dob = 1979-05-27T07:32:00Z

[database]
ports = [8000, 8001]
enabled = true
"#;
    let value = TomlDecoder::new()
        .decode(body, &DecodeOptions::default())
        .unwrap();
    assert_eq!(
        value,
        DecodedValue::Data(json!({
            "title": "example",
            "owner": {"name": "Tom", "dob": "1979-05-27T07:32:00Z"},
            "database": {"ports": [8000, 8001], "enabled": true}
        }))
    );
}

#[test_case(br#"invalid&toml""# ; "garbage")]
#[test_case(b"key = \"unterminated" ; "unterminated string")]
#[test_case(b"[table\nkey = 1" ; "unterminated header")]
fn test_toml_decoder_invalid(body: &[u8]) {
    let err = TomlDecoder::new()
        .decode(body, &DecodeOptions::default())
        .unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_toml_decoder_invalid_utf8() {
    let err = TomlDecoder::new()
        .decode(&[0x6b, 0x3d, 0xff], &DecodeOptions::default())
        .unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("UTF-8"));
}

// ============================================================================
// CSV Decoder Tests
// ============================================================================

#[test]
fn test_csv_decoder_simple() {
    let result = csv("a,b,c", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&["a", "b", "c"]]));
}

#[test]
fn test_csv_decoder_custom_delimiter() {
    let options = DecodeOptions {
        csv: CsvOptions::with_delimiter(';'),
    };
    let result = csv("a;b;c", &options).unwrap();
    assert_eq!(result, rows(&[&["a", "b", "c"]]));
}

#[test]
fn test_csv_decoder_quoted_fields() {
    let body = "1997,Ford,E350,\"ac, abs, moon\",3000.00\n\
                1999,Chevy,\"Venture \"\"Extended Edition\"\"\",\"\",4900.00";
    let result = csv(body, &DecodeOptions::default()).unwrap();
    assert_eq!(
        result,
        rows(&[
            &["1997", "Ford", "E350", "ac, abs, moon", "3000.00"],
            &["1999", "Chevy", "Venture \"Extended Edition\"", "", "4900.00"],
        ])
    );
}

#[test]
fn test_csv_decoder_comment_lines() {
    let options = DecodeOptions {
        csv: CsvOptions::with_delimiter(';').with_comment('%'),
    };
    let result = csv("\n% This is a comment\na;b;c", &options).unwrap();
    assert_eq!(result, rows(&[&["a", "b", "c"]]));
}

#[test]
fn test_csv_decoder_indented_comment() {
    let options = DecodeOptions {
        csv: CsvOptions::default().with_comment('#'),
    };
    let result = csv("   # header note\nx,y\n", &options).unwrap();
    assert_eq!(result, rows(&[&["x", "y"]]));
}

#[test]
fn test_csv_decoder_without_comment_option_keeps_lines() {
    let result = csv("% not a comment\na,b", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&["% not a comment"], &["a", "b"]]));
}

#[test]
fn test_csv_decoder_multiline_quoted_field() {
    let body = "id,note\r\n1,\"first line\r\nsecond line\"\r\n2,plain\r\n";
    let result = csv(body, &DecodeOptions::default()).unwrap();
    assert_eq!(
        result,
        rows(&[
            &["id", "note"],
            &["1", "first line\r\nsecond line"],
            &["2", "plain"],
        ])
    );
}

#[test]
fn test_csv_decoder_ragged_rows_and_empty_fields() {
    let result = csv("a,b,c\nd\ne,,\n", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&["a", "b", "c"], &["d"], &["e", "", ""]]));
}

#[test]
fn test_csv_decoder_fields_not_trimmed() {
    let result = csv(" a , b ", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&[" a ", " b "]]));
}

#[test]
fn test_csv_decoder_empty_input() {
    let result = csv("", &DecodeOptions::default()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_csv_decoder_whitespace_lines_skipped() {
    let result = csv("a,b\n   \n\t\nc,d\n", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&["a", "b"], &["c", "d"]]));
}

#[test]
fn test_csv_decoder_comment_marker_inside_field_kept() {
    let options = DecodeOptions {
        csv: CsvOptions::default().with_comment('#'),
    };
    let result = csv("#skip\nissue,#42\n", &options).unwrap();
    assert_eq!(result, rows(&[&["issue", "#42"]]));
}

#[test]
fn test_csv_decoder_bare_quote_is_literal() {
    let result = csv("a,b\"c,d", &DecodeOptions::default()).unwrap();
    assert_eq!(result, rows(&[&["a", "b\"c", "d"]]));
}

#[test]
fn test_csv_decoder_rejects_non_ascii_delimiter() {
    // Options built directly skip `DecodeOptions::parse` validation
    let options = DecodeOptions {
        csv: CsvOptions::with_delimiter('→'),
    };
    let err = csv("a→b", &options).unwrap_err();
    assert!(err.is_argument(), "unexpected error: {err}");
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_dispatches_by_format() {
    let registry = DecoderRegistry::new();
    for format in DecoderFormat::ALL {
        assert_eq!(registry.get(format).format(), format);
    }
}

#[test]
fn test_registry_decode() {
    let registry = DecoderRegistry::new();
    let value = registry
        .decode(DecoderFormat::Csv, b"a,b", &DecodeOptions::default())
        .unwrap();
    assert_eq!(value, DecodedValue::Rows(rows(&[&["a", "b"]])));
}
