//! Auric Type Checker
//!
//! Bidirectional type checking for Auric: shape-lattice subtyping,
//! refinement predicates decided by a pluggable implication procedure, and
//! `check`/`synth` judgments over core terms.
//!
//! ## Example
//!
//! ```rust
//! use auric_check::TypeChecker;
//! use auric_parse::prelude::*;
//!
//! let module = parse_module("id : ∀a. a -> a\nid[a] x = x").unwrap();
//! let mut checker = TypeChecker::new();
//! let types = checker.check_module(&module).unwrap();
//! assert_eq!(types.get("id").unwrap().to_string(), "∀a. a → a");
//! ```

pub mod error;
pub mod context;
pub mod shapes;
pub mod subtype;
pub mod subst;
pub mod case;
pub mod infer;
pub mod check;

pub use error::{TypeError, TypeResult};
pub use context::Context;
pub use shapes::leq_shape;
pub use subtype::{implies, leq_type, leq_type_with, Implication, SyntacticImplication};
pub use subst::subst;
pub use infer::{synth, synth_with};
pub use check::{check, check_with};

use auric_ast::decl::{Module, Signatures};
use auric_ast::expr::Expr;
use auric_ast::types::Type;
use tracing::debug;

/// Type checker instance
pub struct TypeChecker {
    pub ctx: Context,
    implication: Box<dyn Implication>,
}

impl TypeChecker {
    /// Create a new type checker with empty context
    pub fn new() -> Self {
        TypeChecker::with_context(Context::new())
    }

    /// Create a type checker over an existing context
    pub fn with_context(ctx: Context) -> Self {
        TypeChecker { ctx, implication: Box::new(SyntacticImplication) }
    }

    /// Replace the refinement implication procedure
    pub fn with_implication(mut self, implication: impl Implication + 'static) -> Self {
        self.implication = Box::new(implication);
        self
    }

    /// Synthesize the type of an expression
    pub fn synth(&self, expr: &Expr) -> TypeResult<Type> {
        synth_with(self.implication.as_ref(), &self.ctx, expr)
    }

    /// Check that an expression has the expected type
    pub fn check(&self, expr: &Expr, expected: &Type) -> TypeResult<()> {
        check_with(self.implication.as_ref(), &self.ctx, expr, expected)
    }

    /// Is `a` a subtype of `b` under this checker's implication procedure?
    pub fn leq(&self, a: &Type, b: &Type) -> bool {
        leq_type_with(self.implication.as_ref(), a, b)
    }

    /// Type check a module, returning one type per definition in source order
    ///
    /// Signatures without a definition declare names the host provides; they
    /// are in scope for every definition. Each definition is checked against
    /// its signature when it has one and synthesized otherwise, then defined
    /// for the definitions after it.
    pub fn check_module(&mut self, module: &Module) -> TypeResult<Signatures> {
        for (name, ty) in module.signatures.iter() {
            if !module.definitions.contains(name) {
                debug!(name, ty = %ty, "declared");
                self.define(name, ty.clone());
            }
        }

        let mut results = Signatures::new();
        for (name, expr) in module.definitions.iter() {
            let ty = match module.signatures.get(name) {
                Some(sig) => self.check(expr, sig).map(|()| sig.clone()),
                None => self.synth(expr),
            }
            .map_err(|e| e.in_definition(name))?;

            debug!(name, ty = %ty, "checked definition");
            self.define(name, ty.clone());
            results.insert(name, ty);
        }

        Ok(results)
    }

    /// Define a global binding
    pub fn define(&mut self, name: impl Into<Box<str>>, ty: Type) {
        self.ctx.define(name, ty);
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
