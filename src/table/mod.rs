//! The route trie.
//!
//! Nodes live in an arena and refer to their children by index. Each node
//! carries up to three leaves, one per [`TrailingSlash`] disposition, so `/a`,
//! `/a/` and `/a/<rest>`-style patterns that end at the same node coexist.
//!
//! Removing a route prunes the branch it leaves empty. Pruned slots go on a
//! free list and are reused by later insertions, so the arena stays bounded
//! by the largest number of live nodes.

mod keymap;
mod node;

pub use self::node::Route;

pub(crate) use self::node::{Node, NodeId, ROOT};

use crate::path::{PatternPath, TrailingSlash};
use crate::router::RouterError;

use smallvec::SmallVec;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    len: usize,
    next_priority: u64,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTable<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            free: Vec::new(),
            len: 0,
            next_priority: 0,
        }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every route. Priorities keep increasing across clears.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::root());
        self.free.clear();
        self.len = 0;
    }

    /// Stores `resource` under `pattern`.
    ///
    /// Patterns that differ only in placeholder aliases share an address.
    /// An occupied address is an error when `strict` is set; otherwise the
    /// previous route is replaced and returned.
    pub fn insert(
        &mut self,
        pattern: PatternPath,
        resource: T,
        strict: bool,
    ) -> Result<Option<Route<T>>, RouterError> {
        if strict {
            if let Some(existing) = self.get(&pattern) {
                return Err(RouterError::DuplicateRoute {
                    pattern: existing.pattern.to_string().into(),
                });
            }
        }

        let mut id = ROOT;
        for (i, seg) in pattern.segments().iter().enumerate() {
            id = match self.nodes[id.0].children.find(seg.key_ref()) {
                Some(&child) => child,
                None => {
                    let child = self.alloc(Node::new(seg.key(), i));
                    self.nodes[id.0]
                        .children
                        .find_mut_with(seg.key_ref(), || (seg.key(), child));
                    child
                }
            };
        }

        let priority = self.next_priority;
        self.next_priority += 1;

        debug!(pattern = %pattern, priority, "insert route");

        let trailing = pattern.trailing_slash();
        let old = self.nodes[id.0].leaf_mut(trailing).replace(Route {
            pattern,
            resource,
            priority,
        });

        match old {
            Some(ref prev) => debug!(pattern = %prev.pattern, "replaced route"),
            None => self.len += 1,
        }

        Ok(old)
    }

    /// Removes the route stored at `pattern`'s address.
    pub fn remove(&mut self, pattern: &PatternPath) -> Result<Route<T>, RouterError> {
        let not_found = || RouterError::RouteNotFound {
            pattern: pattern.to_string().into(),
        };
        let branch = self.branch(pattern).ok_or_else(not_found)?;
        let id = *branch.last().ok_or_else(not_found)?;
        let route = self.nodes[id.0]
            .leaf_mut(pattern.trailing_slash())
            .take()
            .ok_or_else(not_found)?;
        self.len -= 1;
        debug!(pattern = %route.pattern, "remove route");
        self.prune(&branch);
        Ok(route)
    }

    pub fn get(&self, pattern: &PatternPath) -> Option<&Route<T>> {
        let id = self.locate(pattern)?;
        self.nodes[id.0].leaf(pattern.trailing_slash())
    }

    pub fn contains(&self, pattern: &PatternPath) -> bool {
        self.get(pattern).is_some()
    }

    /// Re-registers every route of `other` under `prefix`, keeping their
    /// relative order but assigning fresh priorities.
    ///
    /// All joined patterns are validated before anything is inserted, so a
    /// failing mount leaves `self` untouched.
    pub fn mount(
        &mut self,
        prefix: &PatternPath,
        other: RouteTable<T>,
        strict: bool,
    ) -> Result<(), RouterError> {
        let mut staged = Vec::with_capacity(other.len());
        for route in other.into_routes() {
            let pattern = prefix.join(&route.pattern).map_err(|e| {
                RouterError::pattern(&format!("{}{}", prefix, route.pattern), e)
            })?;
            if strict && self.contains(&pattern) {
                return Err(RouterError::DuplicateRoute {
                    pattern: pattern.to_string().into(),
                });
            }
            staged.push((pattern, route.resource));
        }

        debug!(prefix = %prefix, routes = staged.len(), "mount table");

        for (pattern, resource) in staged {
            self.insert(pattern, resource, false)?;
        }
        Ok(())
    }

    /// All routes, sorted by pattern.
    pub fn iter(&self) -> impl Iterator<Item = &Route<T>> + '_ {
        let mut routes: Vec<&Route<T>> = self.nodes.iter().flat_map(Node::routes).collect();
        routes.sort_by(|a, b| a.pattern.cmp(&b.pattern));
        routes.into_iter()
    }

    /// All registered patterns, sorted.
    pub fn patterns(&self) -> impl Iterator<Item = &PatternPath> + '_ {
        self.iter().map(Route::pattern)
    }

    /// Consumes the table, yielding routes in registration order.
    pub fn into_routes(self) -> Vec<Route<T>> {
        let mut routes: Vec<Route<T>> = self
            .nodes
            .into_iter()
            .flat_map(|n| n.leaves.into_iter().flatten())
            .collect();
        routes.sort_by_key(|r| r.priority);
        routes
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn locate(&self, pattern: &PatternPath) -> Option<NodeId> {
        let mut id = ROOT;
        for seg in pattern.segments() {
            id = *self.nodes[id.0].children.find(seg.key_ref())?;
        }
        Some(id)
    }

    /// Node ids from the root down to `pattern`'s node.
    fn branch(&self, pattern: &PatternPath) -> Option<SmallVec<[NodeId; 8]>> {
        let mut ids: SmallVec<[NodeId; 8]> = SmallVec::new();
        ids.push(ROOT);
        let mut id = ROOT;
        for seg in pattern.segments() {
            id = *self.nodes[id.0].children.find(seg.key_ref())?;
            ids.push(id);
        }
        Some(ids)
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Unlinks vacant nodes bottom-up along `branch`. The root is never freed.
    fn prune(&mut self, branch: &[NodeId]) {
        for pair in branch.windows(2).rev() {
            let (parent, child) = (pair[0], pair[1]);
            if !self.nodes[child.0].is_vacant() {
                break;
            }
            let node = std::mem::replace(&mut self.nodes[child.0], Node::root());
            if let Some(key) = &node.key {
                self.nodes[parent.0].children.remove(key.as_ref());
            }
            self.free.push(child);
        }
    }
}

impl<T> RouteTable<T> {
    pub(crate) fn leaf(&self, id: NodeId, trailing: TrailingSlash) -> Option<&Route<T>> {
        self.nodes.get(id.0)?.leaf(trailing)
    }
}
