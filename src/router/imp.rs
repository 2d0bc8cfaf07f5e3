use super::captures::Match;
use super::error::RouterError;
use super::Router;

use crate::cache::{CacheStats, MatchCache};
use crate::config::{CacheCapacity, RouterConfig};
use crate::matcher::resolve;
use crate::path::PatternPath;
use crate::table::{Route, RouteTable};

use tracing::{debug, trace};

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Router<T> {
    /// The clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            cache: MatchCache::new(self.config.cache_capacity),
            config: self.config,
        }
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            table: RouteTable::new(),
            cache: MatchCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Resolves a request path to the most specific registered route.
    ///
    /// `path` is expected to be percent-decoded and free of query string and
    /// fragment. `None` means no route matches.
    pub fn find(&self, path: &str) -> Option<Match<'_, T>> {
        let resolved = match self.cache.get(path) {
            Some(cached) => cached,
            None => {
                let resolved = resolve(&self.table, path);
                self.cache.put(path, resolved.clone());
                resolved
            }
        };
        match resolved {
            Some(r) => {
                let m = Match::from_resolved(&self.table, r);
                trace!(path, pattern = %m.pattern(), "route matched");
                Some(m)
            }
            None => {
                trace!(path, "no route matched");
                None
            }
        }
    }

    pub fn insert(&mut self, pattern: &str, data: T) -> &mut Self {
        if let Err(e) = self.try_insert(pattern, data) {
            panic!("{}: pattern = {:?}", e, pattern);
        }
        self
    }

    pub fn try_insert(&mut self, pattern: &str, data: T) -> Result<&mut Self, RouterError> {
        let path = PatternPath::parse(pattern).map_err(|e| RouterError::pattern(pattern, e))?;
        self.table.insert(path, data, self.config.strict)?;
        self.invalidate();
        Ok(self)
    }

    /// Deregisters the route stored at `pattern`'s address and returns its
    /// resource.
    pub fn remove(&mut self, pattern: &str) -> Result<T, RouterError> {
        let path = PatternPath::parse(pattern).map_err(|e| RouterError::pattern(pattern, e))?;
        let route = self.table.remove(&path)?;
        self.invalidate();
        Ok(route.into_resource())
    }

    /// Mounts every route of `router` under `prefix`.
    pub fn mount(&mut self, prefix: &str, router: Router<T>) -> &mut Self {
        if let Err(e) = self.try_mount(prefix, router) {
            panic!("{}: prefix = {:?}", e, prefix);
        }
        self
    }

    pub fn try_mount(&mut self, prefix: &str, router: Router<T>) -> Result<&mut Self, RouterError> {
        let prefix_path = PatternPath::parse(prefix).map_err(|e| RouterError::pattern(prefix, e))?;
        self.table
            .mount(&prefix_path, router.table, self.config.strict)?;
        self.invalidate();
        Ok(self)
    }

    pub fn nest(&mut self, prefix: &str, f: impl FnOnce(&mut Router<T>)) -> &mut Self {
        let router = self.sub_router(f);
        self.mount(prefix, router)
    }

    pub fn try_nest(
        &mut self,
        prefix: &str,
        f: impl FnOnce(&mut Router<T>),
    ) -> Result<&mut Self, RouterError> {
        let router = self.sub_router(f);
        self.try_mount(prefix, router)
    }

    /// The resource registered at exactly `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&T> {
        let path = PatternPath::parse(pattern).ok()?;
        self.table.get(&path).map(Route::resource)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.get(pattern).is_some()
    }

    /// Registered routes sorted by pattern.
    pub fn iter(&self) -> impl Iterator<Item = (&PatternPath, &T)> + '_ {
        self.table.iter().map(|r| (r.pattern(), r.resource()))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PatternPath> + '_ {
        self.table.patterns()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.invalidate();
    }

    pub fn table(&self) -> &RouteTable<T> {
        &self.table
    }

    pub fn into_table(self) -> RouteTable<T> {
        self.table
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Whether a lookup of `path` would be served from the cache.
    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.contains(path)
    }
}

impl<T> Router<T> {
    fn invalidate(&mut self) {
        if self.cache.len() > 0 {
            debug!(entries = self.cache.len(), "clear match cache");
            self.cache.clear();
        }
    }

    fn sub_router(&self, f: impl FnOnce(&mut Router<T>)) -> Router<T> {
        let config = self
            .config
            .with_cache_capacity(CacheCapacity::Disabled);
        let mut router = Router::with_config(config);
        f(&mut router);
        router
    }
}

impl<T> From<RouteTable<T>> for Router<T> {
    fn from(table: RouteTable<T>) -> Self {
        let mut router = Self::new();
        router.table = table;
        router
    }
}
