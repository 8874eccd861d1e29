//! Unmarshal dispatcher
//!
//! Entry point that turns a 1–2 argument call into a decoded value.
//!
//! # Overview
//!
//! ```text
//! args ─► Source ─► cache? ──hit──────────────────────────► value / error
//!                     │
//!                    miss ─► read ─► resolve format ─► decode ─► cache ─►
//! ```
//!
//! Accepted call shapes:
//! - `unmarshal([data])`
//! - `unmarshal([options, data])` where `options` is a map
//!
//! Results are cached by the data's identity key only. Options are applied on
//! the first decode of a key; later calls with the same key get the cached
//! outcome whatever options they pass.

use crate::cache::ResultCache;
use crate::config::UnmarshalConfig;
use crate::decode::{DecodeOptions, DecoderFormat, DecoderRegistry};
use crate::error::{Error, Result};
use crate::format;
use crate::source::{Arg, Content, Source};
use crate::types::{DecodedValue, JsonObject};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback invoked once for every decode that actually runs
pub type DecodeHook = Arc<dyn Fn(&str, DecoderFormat) + Send + Sync>;

/// Format-agnostic unmarshaler backed by a shared result cache
#[derive(Clone)]
pub struct Unmarshaler {
    cache: Arc<ResultCache>,
    registry: DecoderRegistry,
    config: UnmarshalConfig,
    decode_hook: Option<DecodeHook>,
}

impl fmt::Debug for Unmarshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unmarshaler")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .field("decode_hook", &self.decode_hook.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Unmarshaler {
    fn default() -> Self {
        Self::new(Arc::new(ResultCache::new()))
    }
}

impl Unmarshaler {
    /// Create an unmarshaler over `cache` with the default configuration
    pub fn new(cache: Arc<ResultCache>) -> Self {
        Self::with_config(cache, UnmarshalConfig::default())
    }

    /// Create an unmarshaler over `cache` with a custom configuration
    pub fn with_config(cache: Arc<ResultCache>, config: UnmarshalConfig) -> Self {
        Self {
            cache,
            registry: DecoderRegistry::new(),
            config,
            decode_hook: None,
        }
    }

    /// Register a callback run on every actual (uncached) decode
    #[must_use]
    pub fn with_decode_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, DecoderFormat) + Send + Sync + 'static,
    {
        self.decode_hook = Some(Arc::new(hook));
        self
    }

    /// The shared result cache
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// The active configuration
    pub fn config(&self) -> &UnmarshalConfig {
        &self.config
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        debug!("Clearing unmarshal cache ({} entries)", self.cache.len());
        self.cache.clear();
    }

    /// Unmarshal `[data]` or `[options, data]`
    pub fn unmarshal(&self, args: &[Arg]) -> Result<Arc<DecodedValue>> {
        match args {
            [data] => self.dispatch(None, data, 1),
            [options, data] => {
                let options = options.as_options().ok_or_else(|| {
                    Error::argument(format!(
                        "argument 1: options must be a map, got {}",
                        options.type_name()
                    ))
                })?;
                self.dispatch(Some(options), data, 2)
            }
            _ => Err(Error::argument(format!(
                "unmarshal takes 1 or 2 arguments, got {}",
                args.len()
            ))),
        }
    }

    /// Unmarshal a single data argument with default options
    pub fn unmarshal_data(&self, data: impl Into<Arg>) -> Result<Arc<DecodedValue>> {
        self.dispatch(None, &data.into(), 1)
    }

    /// Unmarshal a data argument with an options map
    pub fn unmarshal_with_options(
        &self,
        options: &JsonObject,
        data: impl Into<Arg>,
    ) -> Result<Arc<DecodedValue>> {
        self.dispatch(Some(options), &data.into(), 2)
    }

    fn dispatch(
        &self,
        options: Option<&JsonObject>,
        data: &Arg,
        position: usize,
    ) -> Result<Arc<DecodedValue>> {
        let source = Source::from_arg(data, position)?;
        let key = source.key();

        if let Some(cached) = self.cache.get(&key) {
            debug!("Unmarshal cache hit: {}", abbreviate(&key));
            return cached;
        }

        let options = self.config.decode_options().merge(options)?;
        let content = source.read()?;
        let result = self.decode(&content, &options);

        match &result {
            Ok(_) => self.cache.put(key.into_owned(), result.clone()),
            Err(e) if e.is_cacheable() => {
                warn!("Caching failed unmarshal of {}: {}", abbreviate(&key), e);
                self.cache.put(key.into_owned(), result.clone());
            }
            Err(_) => {}
        }

        result
    }

    fn decode(&self, content: &Content<'_>, options: &DecodeOptions) -> Result<Arc<DecodedValue>> {
        let format = match content.media_type.as_ref() {
            Some(media_type) => {
                format::resolve(Some(media_type), &content.bytes, options.csv.delimiter)?
            }
            None if !self.config.sniff_content => {
                return Err(Error::unsupported(
                    "content declares no media type and sniffing is disabled",
                ));
            }
            None => format::sniff(&content.bytes, options.csv.delimiter)?,
        };

        debug!("Decoding {} as {}", abbreviate(&content.key), format);

        if let Some(hook) = &self.decode_hook {
            hook(&*content.key, format);
        }

        self.registry
            .decode(format, &content.bytes, options)
            .map(Arc::new)
    }
}

/// Shorten raw-content keys for log lines
fn abbreviate(key: &str) -> String {
    const MAX: usize = 48;

    match key.char_indices().nth(MAX) {
        Some((end, _)) => format!("{:?}...", &key[..end]),
        None => format!("{key:?}"),
    }
}
