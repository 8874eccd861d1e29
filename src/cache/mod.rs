//! Result cache module
//!
//! Memoizes decode outcomes by content identity key.
//!
//! # Overview
//!
//! The cache stores a `Result` per key, so a content that failed to decode
//! keeps failing with the same error without being parsed again. Entries are
//! never evicted one by one; `clear()` empties the whole cache, typically
//! between independent processing passes.
//!
//! Concurrent first-time misses for the same key may each decode and race to
//! `put`; the last write wins.

use crate::error::Result;
use crate::types::DecodedValue;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A cached decode outcome, shared with every caller
pub type CachedResult = Result<Arc<DecodedValue>>;

/// Cumulative lookup statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
}

/// Thread-safe store of decode results keyed by content identity
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, CachedResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the outcome stored for `key`
    pub fn get(&self, key: &str) -> Option<CachedResult> {
        let entry = self.entries.read().get(key).cloned();

        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        entry
    }

    /// Store the outcome for `key`, replacing any previous one
    pub fn put(&self, key: impl Into<String>, result: CachedResult) {
        self.entries.write().insert(key.into(), result);
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Hit and miss counts since the cache was created
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
