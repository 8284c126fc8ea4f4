//! Pretty printing for Auric types
//!
//! Renders shapes and types back to surface syntax. The output re-parses to
//! a structurally equal type: parentheses are inserted exactly where the
//! grammar's precedence would otherwise regroup the tree.

use std::fmt::{self, Write};
use crate::shape::Shape;
use crate::types::Type;

/// Pretty print configuration
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Use Unicode operators (true) or ASCII fallbacks (false)
    pub unicode: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        PrettyConfig { unicode: true }
    }
}

impl PrettyConfig {
    pub fn ascii() -> Self {
        PrettyConfig { unicode: false }
    }

    fn forall(&self) -> &'static str {
        if self.unicode { "∀" } else { "forall " }
    }

    fn arrow(&self) -> &'static str {
        if self.unicode { "→" } else { "->" }
    }

    fn union(&self) -> &'static str {
        if self.unicode { "∪" } else { "\\/" }
    }

    fn inter(&self) -> &'static str {
        if self.unicode { "∩" } else { "/\\" }
    }
}

/// Render a type to a string
pub fn print_type(ty: &Type, config: &PrettyConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_type(&mut out, ty, config);
    out
}

/// Render a shape to a string
pub fn print_shape(shape: &Shape, config: &PrettyConfig) -> String {
    let mut out = String::new();
    let _ = write_shape(&mut out, shape, config);
    out
}

pub(crate) fn write_type(out: &mut impl Write, ty: &Type, config: &PrettyConfig) -> fmt::Result {
    match ty {
        Type::Var(name) => write!(out, "{}", name),
        Type::Shape(shape) => write_shape(out, shape, config),
        Type::Refined(shape, pred) => {
            write!(out, "{{ ")?;
            write_shape(out, shape, config)?;
            write!(out, " {} }}", pred)
        }
        Type::Arrow(param, ret) => {
            write_type_at(out, param, 2, config)?;
            write!(out, " {} ", config.arrow())?;
            write_type(out, ret, config)
        }
        Type::Forall(tv, body) => {
            write!(out, "{}{}. ", config.forall(), tv)?;
            write_type(out, body, config)
        }
        Type::App(head, arg) => {
            write_type_at(out, head, 3, config)?;
            write!(out, " ")?;
            write_type_at(out, arg, 4, config)
        }
    }
}

/// Write `ty`, parenthesized if it binds looser than `min`
fn write_type_at(out: &mut impl Write, ty: &Type, min: u8, config: &PrettyConfig) -> fmt::Result {
    if ty.precedence() < min {
        write!(out, "(")?;
        write_type(out, ty, config)?;
        write!(out, ")")
    } else {
        write_type(out, ty, config)
    }
}

pub(crate) fn write_shape(out: &mut impl Write, shape: &Shape, config: &PrettyConfig) -> fmt::Result {
    match shape {
        Shape::Top => write!(out, "Top"),
        Shape::Bot => write!(out, "Bot"),
        Shape::Base(name) => write!(out, "{}", name),
        // Left-associative: the right operand needs parentheses at equal precedence
        Shape::Union(l, r) => {
            write_shape_at(out, l, 1, config)?;
            write!(out, " {} ", config.union())?;
            write_shape_at(out, r, 2, config)
        }
        Shape::Inter(l, r) => {
            write_shape_at(out, l, 2, config)?;
            write!(out, " {} ", config.inter())?;
            write_shape_at(out, r, 3, config)
        }
        Shape::Diff(l, minus) => {
            write_shape_at(out, l, 3, config)?;
            write!(out, " \\ {}", minus)
        }
    }
}

fn write_shape_at(out: &mut impl Write, shape: &Shape, min: u8, config: &PrettyConfig) -> fmt::Result {
    if shape.precedence() < min {
        write!(out, "(")?;
        write_shape(out, shape, config)?;
        write!(out, ")")
    } else {
        write_shape(out, shape, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forall_arrow() {
        let ty = Type::forall("a", Type::arrow(Type::app(Type::base("List"), Type::var("a")), Type::var("a")));
        assert_eq!(ty.to_string(), "∀a. List a → a");
        assert_eq!(print_type(&ty, &PrettyConfig::ascii()), "forall a. List a -> a");
    }

    #[test]
    fn test_arrow_parenthesizes_left() {
        let ty = Type::arrow(Type::arrow(Type::var("a"), Type::var("b")), Type::var("c"));
        assert_eq!(ty.to_string(), "(a → b) → c");
    }

    #[test]
    fn test_app_argument_parenthesized() {
        let ty = Type::app(Type::base("List"), Type::app(Type::base("List"), Type::var("a")));
        assert_eq!(ty.to_string(), "List (List a)");
    }

    #[test]
    fn test_shape_precedence() {
        let s = Shape::inter(Shape::union(Shape::base("List"), Shape::base("Nat")), Shape::base("Bool"));
        assert_eq!(s.to_string(), "(List ∪ Nat) ∩ Bool");
        let s = Shape::union(Shape::base("List"), Shape::union(Shape::base("Nat"), Shape::base("Bool")));
        assert_eq!(s.to_string(), "List ∪ (Nat ∪ Bool)");
        let s = Shape::diff(Shape::union(Shape::base("List"), Shape::base("Nat")), "nil");
        assert_eq!(print_shape(&s, &PrettyConfig::ascii()), "(List \\/ Nat) \\ nil");
    }

    #[test]
    fn test_refinement() {
        let ty = Type::refined(Shape::base("Nat"), "n > 0");
        assert_eq!(ty.to_string(), "{ Nat n > 0 }");
    }
}
