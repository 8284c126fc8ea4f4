//! Shape lattice subtyping
//!
//! `leq_shape(a, b)` decides whether every value of shape `a` is also a
//! value of shape `b` by structural case analysis, without materializing
//! tag sets. The rules are tried in order:
//!
//! 1. `Bot` on the left, or `Top` on the right: holds
//! 2. `Top` on the left, or `Bot` on the right: fails
//! 3. two bases: names must match
//! 4. union on the left: both disjuncts must be below
//! 5. intersection on the right: below both conjuncts
//! 6. union on the right: below either disjunct
//! 7. intersection on the left: either conjunct below
//! 8. difference on the left: the undiminished operand must be below
//!
//! Rule 8 ignores the removed tag, and the asymmetric handling of unions and
//! intersections means some shapes are not recognized as below themselves
//! (`List \ nil`, `Top ∪ List`). Callers compare shapes, not tag sets.

use auric_ast::shape::Shape;

/// Shape subtyping `a ≤ b`
pub fn leq_shape(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Bot, _) | (_, Shape::Top) => true,
        (Shape::Top, _) | (_, Shape::Bot) => false,
        (Shape::Base(x), Shape::Base(y)) => x == y,
        (Shape::Union(l, r), _) => leq_shape(l, b) && leq_shape(r, b),
        (_, Shape::Inter(l, r)) => leq_shape(a, l) && leq_shape(a, r),
        (_, Shape::Union(l, r)) => leq_shape(a, l) || leq_shape(a, r),
        (Shape::Inter(l, r), _) => leq_shape(l, b) || leq_shape(r, b),
        (Shape::Diff(l, _), _) => leq_shape(l, b),
        _ => false,
    }
}
