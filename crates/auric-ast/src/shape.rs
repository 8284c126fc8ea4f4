//! Constructor shapes
//!
//! A shape is a symbolic description of which data-constructor tags a value
//! may carry. Base shapes name a registered data type (`List` → {nil, cons});
//! compound shapes combine them with union, intersection and single-tag
//! difference.

use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Registered data types and their constructor tags, in declaration order.
///
/// Process-wide and read-only.
pub static CONSTRUCTORS: &[(&str, &[&str])] = &[
    ("Nat", &["zero", "succ"]),
    ("Bool", &["true", "false"]),
    ("List", &["nil", "cons"]),
];

/// Look up the constructor tags registered for a base type name
pub fn registered(name: &str) -> Option<&'static [&'static str]> {
    CONSTRUCTORS
        .iter()
        .find(|(base, _)| *base == name)
        .map(|(_, tags)| *tags)
}

/// Shape expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Every tag
    Top,
    /// No tag (uninhabited)
    Bot,
    /// Constructor set registered for a named data type
    Base(Box<str>),
    /// A ∪ B
    Union(Box<Shape>, Box<Shape>),
    /// A ∩ B
    Inter(Box<Shape>, Box<Shape>),
    /// A \ tag
    Diff(Box<Shape>, Box<str>),
}

impl Shape {
    pub fn base(name: impl Into<Box<str>>) -> Self {
        Shape::Base(name.into())
    }

    pub fn union(left: Shape, right: Shape) -> Self {
        Shape::Union(Box::new(left), Box::new(right))
    }

    pub fn inter(left: Shape, right: Shape) -> Self {
        Shape::Inter(Box::new(left), Box::new(right))
    }

    pub fn diff(left: Shape, minus: impl Into<Box<str>>) -> Self {
        Shape::Diff(Box::new(left), minus.into())
    }

    /// Name of the base shape, if this is one
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Shape::Base(name) => Some(name),
            _ => None,
        }
    }

    /// Binding strength when printed: union 1, intersection 2, difference 3, atoms 4
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Shape::Union(..) => 1,
            Shape::Inter(..) => 2,
            Shape::Diff(..) => 3,
            Shape::Top | Shape::Bot | Shape::Base(_) => 4,
        }
    }
}

/// Constructor tags denoted by a shape.
///
/// `Top` has no finite enumeration and `Bot` has none at all; both fall
/// through to the empty set, so callers that care about `Top` must
/// special-case it before asking. Unknown base names are empty as well.
pub fn ctors(shape: &Shape) -> BTreeSet<&'static str> {
    match shape {
        Shape::Base(name) => registered(name)
            .map(|tags| tags.iter().copied().collect())
            .unwrap_or_default(),
        Shape::Union(l, r) => ctors(l).union(&ctors(r)).copied().collect(),
        Shape::Inter(l, r) => ctors(l).intersection(&ctors(r)).copied().collect(),
        Shape::Diff(l, minus) => {
            let mut tags = ctors(l);
            tags.remove(minus.as_ref());
            tags
        }
        Shape::Top | Shape::Bot => BTreeSet::new(),
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::pretty::write_shape(f, self, &crate::pretty::PrettyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list() -> Shape { Shape::base("List") }
    fn nat() -> Shape { Shape::base("Nat") }

    fn set(tags: &[&'static str]) -> BTreeSet<&'static str> {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_base_list() {
        assert_eq!(ctors(&list()), set(&["nil", "cons"]));
    }

    #[test]
    fn test_unknown_base_is_empty() {
        assert!(ctors(&Shape::base("Tree")).is_empty());
    }

    #[test]
    fn test_union() {
        assert_eq!(ctors(&Shape::union(list(), nat())), set(&["nil", "cons", "zero", "succ"]));
    }

    #[test]
    fn test_inter() {
        assert!(ctors(&Shape::inter(list(), nat())).is_empty());
        assert_eq!(ctors(&Shape::inter(list(), list())), set(&["nil", "cons"]));
    }

    #[test]
    fn test_diff_removes_one_tag() {
        assert_eq!(ctors(&Shape::diff(list(), "nil")), set(&["cons"]));
        assert_eq!(ctors(&Shape::diff(list(), "zero")), set(&["nil", "cons"]));
    }

    #[test]
    fn test_extremes_are_empty() {
        assert!(ctors(&Shape::Top).is_empty());
        assert!(ctors(&Shape::Bot).is_empty());
    }

    fn arb_shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            Just(Shape::Top),
            Just(Shape::Bot),
            prop::sample::select(vec!["Nat", "Bool", "List", "Tree"]).prop_map(|n| Shape::base(n)),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Shape::union(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Shape::inter(l, r)),
                (inner, prop::sample::select(vec!["nil", "cons", "zero", "succ", "true"]))
                    .prop_map(|(l, t)| Shape::diff(l, t)),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_union_is_set_union(a in arb_shape(), b in arb_shape()) {
            let expected: BTreeSet<_> = ctors(&a).union(&ctors(&b)).copied().collect();
            prop_assert_eq!(ctors(&Shape::union(a, b)), expected);
        }

        #[test]
        fn prop_inter_is_set_intersection(a in arb_shape(), b in arb_shape()) {
            let expected: BTreeSet<_> = ctors(&a).intersection(&ctors(&b)).copied().collect();
            prop_assert_eq!(ctors(&Shape::inter(a, b)), expected);
        }

        #[test]
        fn prop_diff_removes_exactly_one(a in arb_shape(), t in prop::sample::select(vec!["nil", "cons", "zero"])) {
            let mut expected = ctors(&a);
            expected.remove(t);
            prop_assert_eq!(ctors(&Shape::diff(a, t)), expected);
        }
    }
}
