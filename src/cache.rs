//! Bounded memo from request path to lookup result.

use crate::config::CacheCapacity;
use crate::matcher::Resolved;

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    /// `None` when unbounded.
    pub capacity: Option<usize>,
}

/// Least-recently-used cache of lookups, no-match results included.
///
/// `get` promotes the entry, `put` evicts the least recently used one when
/// full. A disabled cache stores nothing and every lookup is a miss.
#[derive(Debug)]
pub(crate) struct MatchCache {
    capacity: CacheCapacity,
    map: Option<Mutex<LruCache<Box<str>, Option<Resolved>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatchCache {
    pub fn new(capacity: CacheCapacity) -> Self {
        let map = match capacity {
            CacheCapacity::Disabled => None,
            CacheCapacity::Bounded(n) => NonZeroUsize::new(n).map(LruCache::new),
            CacheCapacity::Unbounded => Some(LruCache::unbounded()),
        };
        Self {
            capacity,
            map: map.map(Mutex::new),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the memoized result, promoting it to most recently used.
    /// The outer `None` is a miss; the inner `None` is a cached no-match.
    pub fn get(&self, path: &str) -> Option<Option<Resolved>> {
        let map = self.map.as_ref()?;
        let ret = map.lock().get(path).cloned();
        match ret {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(path, "match cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(path, "match cache miss");
            }
        }
        ret
    }

    pub fn put(&self, path: &str, resolved: Option<Resolved>) {
        if let Some(map) = &self.map {
            map.lock().put(path.into(), resolved);
        }
    }

    /// Whether `path` is cached, without touching its recency.
    pub fn contains(&self, path: &str) -> bool {
        match &self.map {
            Some(map) => map.lock().contains(path),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.lock().len())
    }

    pub fn clear(&self) {
        if let Some(map) = &self.map {
            map.lock().clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.len(),
            capacity: match self.capacity {
                CacheCapacity::Disabled => Some(0),
                CacheCapacity::Bounded(n) => Some(n),
                CacheCapacity::Unbounded => None,
            },
        }
    }
}
