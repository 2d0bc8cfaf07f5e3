use crate::matcher::{MatchKey, Resolved};
use crate::path::PatternPath;
use crate::table::{Route, RouteTable};

use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

/// Value captured by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Captured by `{alias}`.
    One(String),
    /// Captured by `<alias>`, one entry per request token.
    Many(Vec<String>),
}

impl Binding {
    pub fn as_one(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            Self::One(_) => None,
            Self::Many(v) => Some(v),
        }
    }
}

/// Placeholder bindings of a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    buf: SmallVec<[(Box<str>, Binding); 4]>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, alias: &str) -> Option<&Binding> {
        self.buf
            .iter()
            .find_map(|(k, v)| if &**k == alias { Some(v) } else { None })
    }

    pub fn get_one(&self, alias: &str) -> Option<&str> {
        self.get(alias)?.as_one()
    }

    pub fn get_many(&self, alias: &str) -> Option<&[String]> {
        self.get(alias)?.as_many()
    }

    pub fn parse<T: FromStr>(&self, alias: &str) -> Option<Result<T, T::Err>> {
        self.get_one(alias).map(T::from_str)
    }

    pub(crate) fn push(&mut self, alias: &str, binding: Binding) {
        self.buf.push((alias.into(), binding));
    }

    pub(crate) fn extend_many(&mut self, alias: &str, token: &str) {
        let existing = self.buf.iter_mut().find(|(k, _)| &**k == alias);
        match existing {
            Some((_, Binding::Many(v))) => v.push(token.into()),
            _ => self.push(alias, Binding::Many(vec![token.into()])),
        }
    }
}

impl Deref for Bindings {
    type Target = [(Box<str>, Binding)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct Match<'r, T> {
    route: &'r Route<T>,
    key: MatchKey,
    bindings: Arc<Bindings>,
}

impl<'r, T> Match<'r, T> {
    /// Panics if `resolved` was not produced by `table` in its current state.
    pub(crate) fn from_resolved(table: &'r RouteTable<T>, resolved: Resolved) -> Self {
        let route = match table.leaf(resolved.node, resolved.trailing) {
            Some(route) => route,
            None => unreachable!(
                "resolved route is missing from its table: node = {:?}, trailing = {:?}",
                resolved.node, resolved.trailing
            ),
        };
        Self {
            route,
            key: resolved.key,
            bindings: resolved.bindings,
        }
    }

    pub fn pattern(&self) -> &'r PatternPath {
        &self.route.pattern
    }

    pub fn resource(&self) -> &'r T {
        &self.route.resource
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn priority(&self) -> u64 {
        self.route.priority
    }

    pub fn literal_count(&self) -> usize {
        self.key.literal
    }

    pub fn named_count(&self) -> usize {
        self.key.named
    }

    /// Bindings that can outlive the borrow of the router.
    pub fn shared_bindings(&self) -> Arc<Bindings> {
        Arc::clone(&self.bindings)
    }

    /// The comparison key this match won with.
    pub fn key(&self) -> MatchKey {
        self.key
    }
}

impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        Self {
            route: self.route,
            key: self.key,
            bindings: Arc::clone(&self.bindings),
        }
    }
}
