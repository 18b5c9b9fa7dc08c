//! Secondary index from record name to occupied slot positions.

use std::collections::{BTreeSet, HashMap};

/// Maps each name to the set of slot positions holding a record with that
/// name.
///
/// A name is present only while at least one position is recorded for it:
/// removing the last position drops the key.
#[derive(Debug, Default)]
pub struct NameIndex {
    positions: HashMap<String, BTreeSet<usize>>,
}

impl NameIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `position` holds a record named `name`.
    ///
    /// Returns `false` if the position was already recorded for the name.
    pub fn insert(&mut self, name: &str, position: usize) -> bool {
        match self.positions.get_mut(name) {
            Some(set) => set.insert(position),
            None => {
                self.positions
                    .insert(name.to_owned(), BTreeSet::from([position]));
                true
            }
        }
    }

    /// Forget that `position` holds a record named `name`.
    ///
    /// Returns `true` if the position was recorded. The name is removed
    /// entirely once it has no positions left.
    pub fn remove(&mut self, name: &str, position: usize) -> bool {
        let Some(set) = self.positions.get_mut(name) else {
            return false;
        };
        let removed = set.remove(&position);
        if set.is_empty() {
            self.positions.remove(name);
        }
        removed
    }

    /// Positions holding records named `name`, ascending.
    pub fn positions(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.positions.get(name)
    }

    /// Returns `true` if at least one record carries `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// All indexed names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// `(name, positions)` pairs, in arbitrary name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no name is indexed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total positions across all names.
    pub fn position_count(&self) -> usize {
        self.positions.values().map(BTreeSet::len).sum()
    }
}
