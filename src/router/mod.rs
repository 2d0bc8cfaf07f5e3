mod captures;
mod error;
mod imp;

pub use self::captures::{Binding, Bindings, Match};
pub use self::error::{PatternError, RouterError};

use crate::cache::MatchCache;
use crate::config::RouterConfig;
use crate::table::RouteTable;

/// Route table plus lookup cache.
///
/// Lookups take `&self` and may run concurrently; every mutation takes
/// `&mut self` and drops all memoized lookups.
#[derive(Debug)]
pub struct Router<T> {
    table: RouteTable<T>,
    cache: MatchCache,
    config: RouterConfig,
}
