use crate::router::{Binding, Bindings};

use std::str::FromStr;
use std::sync::Arc;

/// Placeholder bindings handed to a handler.
#[derive(Debug, Clone, Default)]
pub struct Params {
    bindings: Option<Arc<Bindings>>,
}

impl Params {
    /// Value of a `{name}` placeholder.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.as_ref()?.get_one(name)
    }

    /// Tokens captured by a `<name>` placeholder.
    pub fn get_many(&self, name: &str) -> Option<&[String]> {
        self.bindings.as_ref()?.get_many(name)
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> + '_ {
        self.bindings
            .iter()
            .flat_map(|b| b.iter())
            .map(|(k, v)| (&**k, v))
    }

    pub fn len(&self) -> usize {
        self.bindings.as_ref().map_or(0, |b| b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Params {
    pub(super) fn empty() -> Self {
        Self { bindings: None }
    }

    pub(super) fn new(bindings: Arc<Bindings>) -> Self {
        let bindings = if bindings.is_empty() {
            None
        } else {
            Some(bindings)
        };
        Self { bindings }
    }
}
