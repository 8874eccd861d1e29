//! CLI runner - executes commands

use crate::cache::ResultCache;
use crate::cli::commands::{Cli, Commands};
use crate::config::UnmarshalConfig;
use crate::decode::DecoderFormat;
use crate::error::{Error, Result, ResultExt};
use crate::format::format_for_media_type;
use crate::media::MediaType;
use crate::source::{Arg, FileResource, StringResource};
use crate::types::{DecodedValue, JsonObject, JsonValue};
use crate::unmarshal::Unmarshaler;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// One input to decode: a display name and the call arguments
#[derive(Debug, Clone)]
pub struct Input {
    /// Name shown in output and errors
    pub name: String,
    /// Arguments passed to `Unmarshaler::unmarshal`
    pub args: Vec<Arg>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Decode {
                files,
                media_type,
                delimiter,
                comment,
                pretty,
            } => {
                self.decode(
                    files,
                    media_type.as_deref(),
                    delimiter.as_deref(),
                    comment.as_deref(),
                    *pretty,
                )
                .await
            }
            Commands::Formats => {
                self.formats();
                Ok(())
            }
        }
    }

    fn load_config(&self) -> Result<UnmarshalConfig> {
        match &self.cli.config {
            Some(path) => UnmarshalConfig::from_file(path),
            None => Ok(UnmarshalConfig::default()),
        }
    }

    async fn decode(
        &self,
        files: &[PathBuf],
        media_type: Option<&str>,
        delimiter: Option<&str>,
        comment: Option<&str>,
        pretty: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let media_type = media_type.map(MediaType::parse).transpose()?;

        let mut options = JsonObject::new();
        if let Some(delimiter) = delimiter {
            options.insert("delimiter".into(), JsonValue::String(delimiter.into()));
        }
        if let Some(comment) = comment {
            options.insert("comment".into(), JsonValue::String(comment.into()));
        }

        let inputs = build_inputs(files, media_type.as_ref(), &options)?;
        let total = inputs.len();
        let unmarshaler = Arc::new(Unmarshaler::with_config(
            Arc::new(ResultCache::new()),
            config,
        ));

        let results = decode_inputs(Arc::clone(&unmarshaler), inputs).await?;
        debug!("Cache stats after decode: {:?}", unmarshaler.cache().stats());

        let mut failed = 0;
        for (name, result) in results {
            match result {
                Ok(value) => println!("{}", render(&value, pretty)?),
                Err(e) => {
                    failed += 1;
                    eprintln!("{name}: {e}");
                }
            }
        }

        if failed > 0 {
            return Err(Error::Other(format!("{failed} of {total} inputs failed")));
        }

        info!("Decoded {} input(s)", total);
        Ok(())
    }

    fn formats(&self) {
        for format in DecoderFormat::ALL {
            let shape = if format.is_tabular() { "rows" } else { "mapping" };
            println!("{:<6} {:<8} {}", format, shape, format.media_type());
        }
    }
}

/// Turn CLI file arguments into unmarshal inputs. `-` (or no file at all)
/// reads stdin, which may be named only once.
fn build_inputs(
    files: &[PathBuf],
    media_type: Option<&MediaType>,
    options: &JsonObject,
) -> Result<Vec<Input>> {
    collect_inputs(files, media_type, options, read_stdin)
}

fn collect_inputs<F>(
    files: &[PathBuf],
    media_type: Option<&MediaType>,
    options: &JsonObject,
    mut stdin_arg: F,
) -> Result<Vec<Input>>
where
    F: FnMut(Option<&MediaType>) -> Result<Arg>,
{
    if let Some(mt) = media_type {
        if format_for_media_type(mt).is_none() {
            return Err(Error::unsupported(mt.to_string()));
        }
    }

    let stdin = [PathBuf::from(STDIN)];
    let files = if files.is_empty() { &stdin[..] } else { files };

    if files.iter().filter(|path| *path == Path::new(STDIN)).count() > 1 {
        return Err(Error::argument("stdin ('-') may only be given once"));
    }

    let mut inputs = Vec::with_capacity(files.len());

    for path in files {
        let (name, data) = if path == Path::new(STDIN) {
            (STDIN.to_string(), stdin_arg(media_type)?)
        } else {
            let resource = match media_type {
                Some(mt) => FileResource::with_media_type(path, mt.clone()),
                None => FileResource::new(path)?,
            };
            (path.display().to_string(), Arg::resource(resource))
        };

        let args = if options.is_empty() {
            vec![data]
        } else {
            vec![Arg::from(options.clone()), data]
        };
        inputs.push(Input { name, args });
    }

    Ok(inputs)
}

const STDIN: &str = "-";

fn read_stdin(media_type: Option<&MediaType>) -> Result<Arg> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;

    Ok(match media_type {
        Some(mt) => Arg::resource(StringResource::new("stdin", content, mt.clone())),
        None => Arg::from(content),
    })
}

/// Decode every input concurrently on the blocking pool, preserving order
pub async fn decode_inputs(
    unmarshaler: Arc<Unmarshaler>,
    inputs: Vec<Input>,
) -> Result<Vec<(String, Result<Arc<DecodedValue>>)>> {
    let tasks = inputs.into_iter().map(|input| {
        let unmarshaler = Arc::clone(&unmarshaler);
        tokio::task::spawn_blocking(move || {
            let result = unmarshaler.unmarshal(&input.args);
            (input.name, result)
        })
    });

    futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.map_err(|e| Error::Other(format!("Decode task failed: {e}"))))
        .collect()
}

fn render(value: &DecodedValue, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| Error::Other(format!("Failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_build_inputs_infers_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.yaml", "a: 1");

        let inputs = build_inputs(&[path.clone()], None, &JsonObject::new()).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].name, path.display().to_string());
        assert_eq!(inputs[0].args.len(), 1);
    }

    #[test]
    fn test_build_inputs_prepends_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.csv", "a;b");
        let options = json!({"delimiter": ";"});

        let inputs = build_inputs(&[path], None, options.as_object().unwrap()).unwrap();
        assert_eq!(inputs[0].args.len(), 2);
        assert_eq!(inputs[0].args[0].type_name(), "map");
    }

    #[test]
    fn test_build_inputs_unknown_extension() {
        let err = build_inputs(&[PathBuf::from("notes.unknownext")], None, &JsonObject::new())
            .unwrap_err();
        assert!(err.is_unsupported_format());
    }

    #[test]
    fn test_build_inputs_rejects_unmapped_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "events.txt", "BEGIN:VCALENDAR");

        let err = build_inputs(&[path], Some(&MediaType::calendar()), &JsonObject::new())
            .unwrap_err();
        assert!(err.is_unsupported_format());
    }

    fn no_stdin(_: Option<&MediaType>) -> Result<Arg> {
        panic!("stdin must not be read")
    }

    #[test]
    fn test_build_inputs_stdin_only_once() {
        let files = [PathBuf::from("-"), PathBuf::from("-")];
        let err = collect_inputs(&files, None, &JsonObject::new(), no_stdin).unwrap_err();
        assert!(err.is_argument());
    }

    #[test]
    fn test_build_inputs_dash_among_files_reads_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let files = [write(dir.path(), "a.json", "{}"), PathBuf::from("-")];

        let mut reads = 0;
        let inputs = collect_inputs(&files, None, &JsonObject::new(), |_| {
            reads += 1;
            Ok(Arg::from("x: 1"))
        })
        .unwrap();

        assert_eq!(reads, 1);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].name, "-");
        assert_eq!(inputs[1].args[0].type_name(), "string");
    }

    #[test]
    fn test_build_inputs_no_files_reads_stdin() {
        let inputs = collect_inputs(&[], None, &JsonObject::new(), |_| Ok(Arg::from("a,b")))
            .unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].name, "-");
    }

    #[tokio::test]
    async fn test_decode_inputs_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            write(dir.path(), "a.json", r#"{"n": 1}"#),
            write(dir.path(), "b.toml", "n = 2"),
            write(dir.path(), "c.yaml", "n: 3"),
            write(dir.path(), "d.csv", "n,4"),
        ];

        let inputs = build_inputs(&files, None, &JsonObject::new()).unwrap();
        let unmarshaler = Arc::new(Unmarshaler::default());
        let results = decode_inputs(Arc::clone(&unmarshaler), inputs).await.unwrap();

        assert_eq!(results.len(), 4);
        for (i, (_, result)) in results.iter().take(3).enumerate() {
            let value = result.as_ref().unwrap();
            assert_eq!(value.get("n"), Some(&json!(i + 1)));
        }
        let rows = results[3].1.as_ref().unwrap();
        assert_eq!(rows.to_json(), json!([["n", "4"]]));
        assert_eq!(unmarshaler.cache().len(), 4);
    }

    #[tokio::test]
    async fn test_decode_inputs_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            write(dir.path(), "good.json", "{}"),
            write(dir.path(), "bad.json", "{ notjson }"),
        ];

        let inputs = build_inputs(&files, None, &JsonObject::new()).unwrap();
        let results = decode_inputs(Arc::new(Unmarshaler::default()), inputs)
            .await
            .unwrap();

        assert!(results[0].1.is_ok());
        assert!(results[1].1.as_ref().unwrap_err().is_decode());
    }

    #[test]
    fn test_render() {
        let value = DecodedValue::Data(json!({"a": [1, 2]}));
        assert_eq!(render(&value, false).unwrap(), r#"{"a":[1,2]}"#);
        assert!(render(&value, true).unwrap().contains('\n'));
    }
}
