use super::keymap::KeyMap;

use crate::path::{PatternPath, TrailingSlash};
use crate::segment::SegmentKey;

/// Index of a node in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

pub(crate) const ROOT: NodeId = NodeId(0);

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route<T> {
    pub(crate) pattern: PatternPath,
    pub(crate) resource: T,
    pub(crate) priority: u64,
}

impl<T> Route<T> {
    pub fn pattern(&self) -> &PatternPath {
        &self.pattern
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    /// Registration order; later registrations have larger values.
    pub fn priority(&self) -> u64 {
        self.priority
    }

    pub fn into_resource(self) -> T {
        self.resource
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// `None` only for the root.
    pub key: Option<SegmentKey>,
    /// Index of this node's segment inside every pattern ending below it.
    pub segment: usize,
    pub children: KeyMap<NodeId>,
    /// Indexed by [`TrailingSlash::index`].
    pub leaves: [Option<Route<T>>; 3],
}

impl<T> Node<T> {
    pub fn root() -> Self {
        Self {
            key: None,
            segment: 0,
            children: KeyMap::new(),
            leaves: [None, None, None],
        }
    }

    pub fn new(key: SegmentKey, segment: usize) -> Self {
        Self {
            key: Some(key),
            segment,
            children: KeyMap::new(),
            leaves: [None, None, None],
        }
    }

    #[inline]
    pub fn leaf(&self, trailing: TrailingSlash) -> Option<&Route<T>> {
        self.leaves[trailing.index()].as_ref()
    }

    #[inline]
    pub fn leaf_mut(&mut self, trailing: TrailingSlash) -> &mut Option<Route<T>> {
        &mut self.leaves[trailing.index()]
    }

    #[inline]
    pub fn is_greedy(&self) -> bool {
        self.key.as_ref().map_or(false, SegmentKey::is_greedy)
    }

    /// No routes here and nothing below.
    pub fn is_vacant(&self) -> bool {
        self.children.is_empty() && self.leaves.iter().all(Option::is_none)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<T>> + '_ {
        self.leaves.iter().flatten()
    }
}
