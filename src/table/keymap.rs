use crate::segment::{KeyRef, SegmentKey};

/// Child map of a trie node: a vector sorted by key.
///
/// Literal keys come first in byte order, followed by the named key and the
/// greedy key, so iteration order is deterministic.
#[derive(Debug, Clone)]
pub(crate) struct KeyMap<V> {
    entries: Vec<(SegmentKey, V)>,
}

impl<V> Default for KeyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn find(&self, key: KeyRef<'_>) -> Option<&V> {
        let i = self.find_index(key).ok()?;
        Some(&self.entries[i].1)
    }

    pub fn find_mut_with(&mut self, key: KeyRef<'_>, f: impl FnOnce() -> (SegmentKey, V)) -> &mut V {
        let i = match self.find_index(key) {
            Ok(i) => i,
            Err(i) => {
                self.entries.insert(i, f());
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn remove(&mut self, key: KeyRef<'_>) -> Option<V> {
        let i = self.find_index(key).ok()?;
        Some(self.entries.remove(i).1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    fn find_index(&self, key: KeyRef<'_>) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.as_ref().cmp(&key))
    }
}
