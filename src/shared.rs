//! A router that can be updated while it is serving lookups.

use crate::config::RouterConfig;
use crate::router::{Router, RouterError};

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::debug;

/// Publishes immutable [`Router`] snapshots.
///
/// Readers [`load`](Self::load) the current snapshot and keep using it for
/// the whole request. Writers build the next snapshot from a clone of the
/// current one, which starts with an empty lookup cache, and swap it in.
/// Lookups never observe a half-applied update or a stale cache entry.
#[derive(Debug)]
pub struct SharedRouter<T> {
    current: ArcSwap<Router<T>>,
    writer: Mutex<()>,
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self::new(Router::with_config(config))
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    /// Replaces the published router wholesale.
    pub fn replace(&self, router: Router<T>) {
        let _guard = self.writer.lock();
        self.current.store(Arc::new(router));
        debug!("router snapshot replaced");
    }
}

impl<T: Clone> SharedRouter<T> {
    /// Applies `f` to a copy of the current router and publishes the result.
    ///
    /// If `f` fails the published snapshot is left unchanged.
    pub fn update<F>(&self, f: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut Router<T>) -> Result<(), RouterError>,
    {
        let _guard = self.writer.lock();
        let mut next = Router::clone(&self.current.load());
        f(&mut next)?;
        debug!(routes = next.len(), "router snapshot updated");
        self.current.store(Arc::new(next));
        Ok(())
    }
}

impl<T> Default for SharedRouter<T> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<T> From<Router<T>> for SharedRouter<T> {
    fn from(router: Router<T>) -> Self {
        Self::new(router)
    }
}
