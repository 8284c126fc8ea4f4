//! Top-level declarations in Auric
//!
//! A source unit elaborates to two maps: declared signatures and core
//! definitions. Both keep source order; redefining a name overwrites the
//! earlier entry in place.

use serde::{Deserialize, Serialize};
use crate::expr::Expr;
use crate::types::Type;

/// A parsed and elaborated source unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub signatures: Signatures,
    pub definitions: Definitions,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }
}

/// Insertion-ordered name → value map with overwrite-in-place semantics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordered<T> {
    entries: Vec<(Box<str>, T)>,
}

/// `name : Type` declarations
pub type Signatures = Ordered<Type>;

/// `name = ...` definitions, elaborated to core terms
pub type Definitions = Ordered<Expr>;

impl<T> Default for Ordered<T> {
    fn default() -> Self {
        Ordered { entries: Vec::new() }
    }
}

impl<T> Ordered<T> {
    pub fn new() -> Self {
        Ordered::default()
    }

    /// Insert or overwrite; returns the previous value for the name
    pub fn insert(&mut self, name: impl Into<Box<str>>, value: T) -> Option<T> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n.as_ref() == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Box<str>>, T> FromIterator<(K, T)> for Ordered<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Ordered::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<T> IntoIterator for Ordered<T> {
    type Item = (Box<str>, T);
    type IntoIter = std::vec::IntoIter<(Box<str>, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
