//! Persistent name scopes
//!
//! A scope is a parent-pointer chain of single bindings over a shared root
//! table. Extending never mutates an existing frame: `bind` returns a new
//! scope and the original stays valid, so every checking or evaluation
//! frame sees a private extension.

use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
enum Frame<T> {
    Root(HashMap<Box<str>, T>),
    Bind {
        name: Box<str>,
        value: T,
        parent: Rc<Frame<T>>,
    },
}

/// Immutable extend-and-shadow map
#[derive(Debug)]
pub struct Scope<T> {
    head: Rc<Frame<T>>,
}

impl<T> Clone for Scope<T> {
    fn clone(&self) -> Self {
        Scope { head: Rc::clone(&self.head) }
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Scope::root(HashMap::new())
    }
}

impl<T> Scope<T> {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Scope seeded from a table of base bindings
    pub fn root(bindings: HashMap<Box<str>, T>) -> Self {
        Scope { head: Rc::new(Frame::Root(bindings)) }
    }

    /// New scope with `name` bound to `value`, shadowing any outer binding
    pub fn bind(&self, name: impl Into<Box<str>>, value: T) -> Self {
        Scope {
            head: Rc::new(Frame::Bind {
                name: name.into(),
                value,
                parent: Rc::clone(&self.head),
            }),
        }
    }

    /// Innermost binding for `name`
    pub fn lookup(&self, name: &str) -> Option<&T> {
        let mut frame = self.head.as_ref();
        loop {
            match frame {
                Frame::Bind { name: n, value, parent } => {
                    if n.as_ref() == name {
                        return Some(value);
                    }
                    frame = parent.as_ref();
                }
                Frame::Root(table) => return table.get(name),
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of frames above the root
    pub fn depth(&self) -> usize {
        let mut n = 0;
        let mut frame = self.head.as_ref();
        while let Frame::Bind { parent, .. } = frame {
            n += 1;
            frame = parent.as_ref();
        }
        n
    }
}

impl<K: Into<Box<str>>, T> FromIterator<(K, T)> for Scope<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Scope::root(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
