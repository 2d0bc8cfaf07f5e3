//! Router configuration.

/// Size of the lookup cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CacheCapacity {
    /// Every lookup runs the matcher.
    Disabled,
    /// At most this many paths are memoized. Zero behaves like `Disabled`.
    Bounded(usize),
    Unbounded,
}

impl Default for CacheCapacity {
    fn default() -> Self {
        Self::Bounded(RouterConfig::DEFAULT_CACHE_CAPACITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    pub cache_capacity: CacheCapacity,
    /// Reject re-registration of an existing pattern instead of replacing it.
    pub strict: bool,
}

impl RouterConfig {
    pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_capacity(mut self, capacity: CacheCapacity) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
