//! Worklist search over the route trie.
//!
//! Candidates are partial matches: a node reached after consuming a number of
//! request tokens, together with the tokens consumed so far. Those are kept in
//! a persistent list so sibling candidates share their common prefix instead
//! of copying it.
//!
//! Among complete matches the winner has the most literal segments, then the
//! most named placeholders, then the latest registration. Greedy placeholders
//! do not count, so patterns differing only in greedy depth fall through to
//! registration order.

use crate::path::{LiteralPath, TrailingSlash};
use crate::router::{Binding, Bindings, Match};
use crate::segment::{Segment, SegmentKey};
use crate::table::{NodeId, Route, RouteTable, ROOT};

use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

/// Specificity of a match. Field order defines the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchKey {
    pub literal: usize,
    pub named: usize,
    pub priority: u64,
}

/// A match detached from the table borrow, suitable for caching.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub node: NodeId,
    pub trailing: TrailingSlash,
    pub key: MatchKey,
    pub bindings: Arc<Bindings>,
}

struct Step<'p> {
    segment: usize,
    token: &'p str,
    prev: Trail<'p>,
}

type Trail<'p> = Option<Rc<Step<'p>>>;

struct Candidate<'p> {
    node: NodeId,
    depth: usize,
    trail: Trail<'p>,
    literal: usize,
    named: usize,
}

impl<'p> Candidate<'p> {
    fn advance(&self, node: NodeId, segment: usize, key: &SegmentKey, token: &'p str) -> Self {
        let (literal, named) = match key {
            SegmentKey::Literal(_) => (self.literal + 1, self.named),
            SegmentKey::Named => (self.literal, self.named + 1),
            SegmentKey::Greedy => (self.literal, self.named),
        };
        Self {
            node,
            depth: self.depth + 1,
            trail: Some(Rc::new(Step {
                segment,
                token,
                prev: self.trail.clone(),
            })),
            literal,
            named,
        }
    }
}

pub(crate) fn resolve<T>(table: &RouteTable<T>, path: &str) -> Option<Resolved> {
    let path = LiteralPath::new(path);
    let tokens = path.tokens();
    let trailing = TrailingSlash::from_bool(path.ends_with_slash());

    let mut best: Option<(MatchKey, NodeId, TrailingSlash, Trail<'_>, &Route<T>)> = None;

    let mut stack: Vec<Candidate<'_>> = vec![Candidate {
        node: ROOT,
        depth: 0,
        trail: None,
        literal: 0,
        named: 0,
    }];

    while let Some(cand) = stack.pop() {
        let node = table.node(cand.node);

        let token = match tokens.get(cand.depth) {
            Some(&t) => t,
            None => {
                for slot in [trailing, TrailingSlash::Indeterminate] {
                    let route = match node.leaf(slot) {
                        Some(r) => r,
                        None => continue,
                    };
                    let key = MatchKey {
                        literal: cand.literal,
                        named: cand.named,
                        priority: route.priority,
                    };
                    if best.as_ref().map_or(true, |b| key > b.0) {
                        best = Some((key, cand.node, slot, cand.trail.clone(), route));
                    }
                }
                continue;
            }
        };

        for &child in node.children.values() {
            let child_node = table.node(child);
            if let Some(ref key) = child_node.key {
                if key.accepts(token) {
                    stack.push(cand.advance(child, child_node.segment, key, token));
                }
            }
        }

        // pushed last so the greedy placeholder extends before yielding
        if node.is_greedy() {
            stack.push(cand.advance(cand.node, node.segment, &SegmentKey::Greedy, token));
        }
    }

    let (key, node, slot, trail, route) = best?;
    Some(Resolved {
        node,
        trailing: slot,
        key,
        bindings: Arc::new(bind(route, trail)),
    })
}

/// Materializes bindings using the aliases of the winning pattern.
fn bind<T>(route: &Route<T>, mut trail: Trail<'_>) -> Bindings {
    let mut steps: SmallVec<[(usize, &str); 8]> = SmallVec::new();
    while let Some(step) = trail {
        steps.push((step.segment, step.token));
        trail = step.prev.clone();
    }

    let segments = route.pattern.segments();
    let mut bindings = Bindings::new();
    for &(i, token) in steps.iter().rev() {
        match &segments[i] {
            Segment::Literal(_) => {}
            Segment::Named(alias) => bindings.push(alias, Binding::One(token.into())),
            Segment::Greedy(alias) => bindings.extend_many(alias, token),
        }
    }
    bindings
}

impl<T> RouteTable<T> {
    /// Resolves `path` without any caching.
    pub fn find(&self, path: &str) -> Option<Match<'_, T>> {
        let resolved = resolve(self, path)?;
        Some(Match::from_resolved(self, resolved))
    }
}
