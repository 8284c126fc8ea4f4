//! Subtyping for the type language
//!
//! - variables are related only to themselves
//! - shapes reduce to [`leq_shape`]
//! - a plain shape is below a refinement when its shape is below and `true`
//!   implies the refinement's predicate
//! - two refinements need shape subtyping and predicate implication
//! - arrows are contravariant in the parameter, covariant in the result
//! - quantified types are related only when structurally identical, so
//!   `∀a. a` and `∀b. b` are unrelated
//! - applications relate head with head and argument with argument
//!
//! Every other pairing, including a refinement against a plain shape, is
//! unrelated.

use auric_ast::types::Type;
use crate::shapes::leq_shape;

/// Decision procedure for refinement predicates
///
/// Predicates are opaque strings; the checker only ever asks whether one
/// implies another.
pub trait Implication {
    fn implies(&self, phi: &str, psi: &str) -> bool;
}

/// `phi ⇒ psi` when `psi` is literally `true` or both are the same text
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticImplication;

impl Implication for SyntacticImplication {
    fn implies(&self, phi: &str, psi: &str) -> bool {
        psi.trim() == "true" || phi.trim() == psi.trim()
    }
}

/// Predicate implication with the default procedure
pub fn implies(phi: &str, psi: &str) -> bool {
    SyntacticImplication.implies(phi, psi)
}

/// Type subtyping `a ≤ b` with the default implication procedure
pub fn leq_type(a: &Type, b: &Type) -> bool {
    leq_type_with(&SyntacticImplication, a, b)
}

/// Type subtyping `a ≤ b`
pub fn leq_type_with<I: Implication + ?Sized>(imp: &I, a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Var(x), Type::Var(y)) => x == y,
        (Type::Shape(s), Type::Shape(t)) => leq_shape(s, t),
        (Type::Shape(s), Type::Refined(t, q)) => leq_shape(s, t) && imp.implies("true", q),
        (Type::Refined(s, p), Type::Refined(t, q)) => leq_shape(s, t) && imp.implies(p, q),
        (Type::Arrow(p1, r1), Type::Arrow(p2, r2)) => {
            leq_type_with(imp, p2, p1) && leq_type_with(imp, r1, r2)
        }
        (Type::Forall(..), Type::Forall(..)) => a == b,
        (Type::App(h1, a1), Type::App(h2, a2)) => {
            leq_type_with(imp, h1, h2) && leq_type_with(imp, a1, a2)
        }
        _ => false,
    }
}
