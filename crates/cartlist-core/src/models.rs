//! Data models for cartlist
//!
//! Defines the core data structures: `Item` and `ListCollection`.
//! `ListCollection` is the whole persisted state; everything else the
//! store tracks (active list, edit cursor, input buffers) is transient.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single entry on a shopping list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Display name, trimmed and non-empty when created through the store
    pub name: String,
    /// Whether the item has been checked off
    pub bought: bool,
}

impl Item {
    /// Create a new, not-yet-bought item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bought: false,
        }
    }

    /// Flip the bought flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.bought = !self.bought;
        self.bought
    }
}

/// All shopping lists, keyed by their unique name
///
/// Keys keep insertion order, which is the order lists are displayed in.
/// Serializes as a plain JSON object of `name -> [{name, bought}, ...]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ListCollection {
    lists: IndexMap<String, Vec<Item>>,
}

impl ListCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether there are no lists
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Whether a list with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Items of a list
    pub fn get(&self, name: &str) -> Option<&[Item]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    /// List names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Iterate over `(name, items)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.lists
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Item>> {
        self.lists.get_mut(name)
    }

    /// Insert a list at the end. Returns false (and changes nothing) if the
    /// name is already taken.
    pub(crate) fn insert(&mut self, name: String, items: Vec<Item>) -> bool {
        if self.lists.contains_key(&name) {
            return false;
        }
        self.lists.insert(name, items);
        true
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Vec<Item>> {
        self.lists.shift_remove(name)
    }

    /// Re-key a list in place. The caller guarantees `to` is free.
    pub(crate) fn rename(&mut self, from: &str, to: String) -> bool {
        let Some((position, _, items)) = self.lists.shift_remove_full(from) else {
            return false;
        };
        let (inserted_at, _) = self.lists.insert_full(to, items);
        self.lists.move_index(inserted_at, position);
        true
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<Item>)> for ListCollection {
    fn from_iter<T: IntoIterator<Item = (N, Vec<Item>)>>(iter: T) -> Self {
        let mut collection = Self::new();
        for (name, items) in iter {
            collection.lists.insert(name.into(), items);
        }
        collection
    }
}
