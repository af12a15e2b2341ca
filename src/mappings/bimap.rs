use std::hash::Hash;

use indexmap::IndexMap;

/// Insertion-ordered bidirectional relation between originals and their
/// renamed counterparts.
///
/// Both directions are indexed. Inserting a pair displaces any existing
/// pair sharing its key or its value, so the relation stays one-to-one
/// with the last write winning. Removal keeps the remaining order intact.
#[derive(Debug, Clone)]
pub(crate) struct BiMap<T> {
    forward: IndexMap<T, T>,
    reverse: IndexMap<T, T>,
}

impl<T: Clone + Eq + Hash> BiMap<T> {
    pub(crate) fn new() -> BiMap<T> {
        BiMap { forward: IndexMap::new(), reverse: IndexMap::new() }
    }

    pub(crate) fn insert(&mut self, original: T, renamed: T) {
        if let Some(previous_renamed) = self.forward.shift_remove(&original) {
            self.reverse.shift_remove(&previous_renamed);
        }
        if let Some(previous_original) = self.reverse.shift_remove(&renamed) {
            self.forward.shift_remove(&previous_original);
        }
        self.forward.insert(original.clone(), renamed.clone());
        self.reverse.insert(renamed, original);
    }

    pub(crate) fn remove(&mut self, original: &T) -> Option<T> {
        let renamed = self.forward.shift_remove(original)?;
        self.reverse.shift_remove(&renamed);
        Some(renamed)
    }

    pub(crate) fn remove_by_value(&mut self, renamed: &T) -> Option<T> {
        let original = self.reverse.shift_remove(renamed)?;
        self.forward.shift_remove(&original);
        Some(original)
    }

    pub(crate) fn get(&self, original: &T) -> Option<&T> {
        self.forward.get(original)
    }

    pub(crate) fn get_reverse(&self, renamed: &T) -> Option<&T> {
        self.reverse.get(renamed)
    }

    pub(crate) fn contains_key(&self, original: &T) -> bool {
        self.forward.contains_key(original)
    }

    pub(crate) fn contains_value(&self, renamed: &T) -> bool {
        self.reverse.contains_key(renamed)
    }

    pub(crate) fn len(&self) -> usize {
        self.forward.len()
    }

    /// Pairs in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&T, &T)> {
        self.forward.iter()
    }

    /// Pairs in insertion order with the roles swapped.
    pub(crate) fn iter_reverse(&self) -> impl Iterator<Item = (&T, &T)> {
        self.reverse.iter()
    }

    /// The same relation with both directions swapped.
    pub(crate) fn inverted(&self) -> BiMap<T> {
        BiMap { forward: self.reverse.clone(), reverse: self.forward.clone() }
    }
}

impl<T: Clone + Eq + Hash> Default for BiMap<T> {
    fn default() -> BiMap<T> {
        BiMap::new()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for BiMap<T> {
    fn eq(&self, other: &BiMap<T>) -> bool {
        // Order-insensitive; the reverse side is derived.
        self.forward == other.forward
    }
}

impl<T: Clone + Eq + Hash> Eq for BiMap<T> {}
