//! Type language for Auric
//!
//! Features:
//! - Shape types (a constructor-set constraint, no predicate)
//! - Refinement types (shape plus an opaque predicate formula)
//! - Function types
//! - Universal quantification over one type variable
//! - Type-level application (`List a`)

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::shape::Shape;

/// Type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Bound type variable
    Var(Box<str>),

    /// Shape constraint only
    Shape(Shape),

    /// Refinement: { shape predicate }
    Refined(Shape, Box<str>),

    /// Function type: A → B
    Arrow(Box<Type>, Box<Type>),

    /// Universal quantification: ∀α. T
    Forall(Box<str>, Box<Type>),

    /// Type application: F A
    App(Box<Type>, Box<Type>),
}

impl Type {
    // ============ Constructors ============

    pub fn var(name: impl Into<Box<str>>) -> Self {
        Type::Var(name.into())
    }

    pub fn shape(shape: Shape) -> Self {
        Type::Shape(shape)
    }

    /// Shape type over a registered base name
    pub fn base(name: impl Into<Box<str>>) -> Self {
        Type::Shape(Shape::base(name))
    }

    /// The unconstrained type
    pub fn top() -> Self {
        Type::Shape(Shape::Top)
    }

    pub fn refined(shape: Shape, pred: impl Into<Box<str>>) -> Self {
        Type::Refined(shape, pred.into())
    }

    pub fn arrow(param: Type, ret: Type) -> Self {
        Type::Arrow(Box::new(param), Box::new(ret))
    }

    /// Curried function type: A₀ → A₁ → ... → R
    pub fn arrow_n(params: impl IntoIterator<Item = Type>, ret: Type) -> Self {
        let params: Vec<Type> = params.into_iter().collect();
        params.into_iter().rev().fold(ret, |acc, p| Type::arrow(p, acc))
    }

    pub fn forall(tv: impl Into<Box<str>>, body: Type) -> Self {
        Type::Forall(tv.into(), Box::new(body))
    }

    pub fn app(head: Type, arg: Type) -> Self {
        Type::App(Box::new(head), Box::new(arg))
    }

    // ============ Inspection ============

    /// The shape constraint carried directly by a shape or refinement type
    pub fn own_shape(&self) -> Option<&Shape> {
        match self {
            Type::Shape(s) | Type::Refined(s, _) => Some(s),
            _ => None,
        }
    }

    /// Peel a type-application chain: `F a b` → (`F`, [`a`, `b`])
    pub fn spine(&self) -> (&Type, Vec<&Type>) {
        let mut head = self;
        let mut args = Vec::new();
        while let Type::App(f, a) = head {
            args.push(a.as_ref());
            head = f;
        }
        args.reverse();
        (head, args)
    }

    /// Constructor shape of a scrutinee type: its own shape, or the shape at
    /// the head of an application chain
    pub fn constructor_shape(&self) -> Option<&Shape> {
        self.spine().0.own_shape()
    }

    /// Binding strength when printed: quantifier 0, arrow 1, lattice 2, application 3, atoms 4
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Type::Forall(..) => 0,
            Type::Arrow(..) => 1,
            Type::Shape(s) if s.precedence() < 4 => 2,
            Type::App(..) => 3,
            Type::Var(_) | Type::Shape(_) | Type::Refined(..) => 4,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::pretty::write_type(f, self, &crate::pretty::PrettyConfig::default())
    }
}
