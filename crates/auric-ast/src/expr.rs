//! Core terms in Auric
//!
//! The surface syntax elaborates into this small calculus: named variables,
//! single-parameter lambdas, application, erased type abstraction and
//! application, and case analysis on constructor tags.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::types::Type;

/// Binder name that discards its field
pub const WILDCARD: &str = "_";

/// Expression (the core AST node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Named reference
    Var(Box<str>),

    /// Lambda abstraction: λx. body
    Lam(Box<str>, Box<Expr>),

    /// Function application: f x
    App(Box<Expr>, Box<Expr>),

    /// Type abstraction: Λα. body (erased at runtime)
    TyAbs(Box<str>, Box<Expr>),

    /// Type application: f[T]
    TyApp(Box<Expr>, Type),

    /// Case analysis on the scrutinee's constructor tag
    Case {
        scrutinee: Box<Expr>,
        alts: Vec<Alt>,
    },
}

/// One alternative of a case expression: `tag binder* -> body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alt {
    pub tag: Box<str>,
    pub binders: Vec<Box<str>>,
    pub body: Expr,
}

impl Alt {
    pub fn new<S: Into<Box<str>>>(tag: impl Into<Box<str>>, binders: impl IntoIterator<Item = S>, body: Expr) -> Self {
        Alt {
            tag: tag.into(),
            binders: binders.into_iter().map(Into::into).collect(),
            body,
        }
    }

    /// Binders that actually bind, in order
    pub fn named_binders(&self) -> impl Iterator<Item = &str> {
        self.binders.iter().map(|b| b.as_ref()).filter(|b| *b != WILDCARD)
    }
}

impl Expr {
    pub fn var(name: impl Into<Box<str>>) -> Self {
        Expr::Var(name.into())
    }

    pub fn lam(arg: impl Into<Box<str>>, body: Expr) -> Self {
        Expr::Lam(arg.into(), Box::new(body))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App(Box::new(func), Box::new(arg))
    }

    /// Left-nested application: f a b c
    pub fn app_n(func: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        args.into_iter().fold(func, Expr::app)
    }

    pub fn ty_abs(tv: impl Into<Box<str>>, body: Expr) -> Self {
        Expr::TyAbs(tv.into(), Box::new(body))
    }

    pub fn ty_app(func: Expr, ty: Type) -> Self {
        Expr::TyApp(Box::new(func), ty)
    }

    pub fn case(scrutinee: Expr, alts: Vec<Alt>) -> Self {
        Expr::Case { scrutinee: Box::new(scrutinee), alts }
    }

    /// The alternative for a tag, if any
    pub fn alternative<'a>(alts: &'a [Alt], tag: &str) -> Option<&'a Alt> {
        alts.iter().find(|alt| alt.tag.as_ref() == tag)
    }

    /// Whether this needs parentheses when it appears as an application argument
    fn is_atomic(&self) -> bool {
        matches!(self, Expr::Var(_) | Expr::TyApp(..))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Lam(arg, body) => write!(f, "λ{}. {}", arg, body),
            Expr::TyAbs(tv, body) => write!(f, "Λ{}. {}", tv, body),
            Expr::App(func, arg) => {
                match func.as_ref() {
                    Expr::Lam(..) | Expr::TyAbs(..) | Expr::Case { .. } => write!(f, "({})", func)?,
                    _ => write!(f, "{}", func)?,
                }
                if arg.is_atomic() {
                    write!(f, " {}", arg)
                } else {
                    write!(f, " ({})", arg)
                }
            }
            Expr::TyApp(func, ty) => {
                if func.is_atomic() {
                    write!(f, "{}[{}]", func, ty)
                } else {
                    write!(f, "({})[{}]", func, ty)
                }
            }
            Expr::Case { scrutinee, alts } => {
                write!(f, "case {} of", scrutinee)?;
                for (i, alt) in alts.iter().enumerate() {
                    write!(f, "{}", if i == 0 { " " } else { "; " })?;
                    write!(f, "{}", alt.tag)?;
                    for b in &alt.binders {
                        write!(f, " {}", b)?;
                    }
                    write!(f, " -> {}", alt.body)?;
                }
                Ok(())
            }
        }
    }
}
