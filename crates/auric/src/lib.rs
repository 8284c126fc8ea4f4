//! # Auric
//!
//! Pipeline facade over the Auric front-end: parse source text, type check
//! it against declared signatures, and evaluate the elaborated definitions.
//!
//! ## Example
//!
//! ```rust
//! use auric::prelude::*;
//!
//! let defs = auric::elaborate("nonNilHead xs = case xs of cons x _ -> x").unwrap();
//! let values = auric::evaluate(&defs, &standard_constructors()).unwrap();
//! assert!(values.get("nonNilHead").unwrap().is_callable());
//! ```

pub mod prelude;

use auric_ast::decl::{Definitions, Module, Ordered, Signatures};
use auric_ast::ser::SerError;
use auric_check::{Context, TypeChecker, TypeError};
use auric_eval::error::EvalError;
use auric_eval::eval::Evaluator;
use auric_eval::value::{Env, Value};
use auric_parse::loader::LoadError;
use auric_parse::module::parse_module;
use auric_parse::parser::ParseError;
use std::path::Path;
use thiserror::Error;

/// Any failure along the pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Type error: {0}")]
    Type(#[from] TypeError),

    #[error("Runtime error: {0}")]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Serialization error: {0}")]
    Ser(#[from] SerError),
}

pub type Result<T> = std::result::Result<T, Error>;

// ============ Entry Points ============

/// Type of every top-level definition, in source order
///
/// `_prims` is not consulted; constructor types come from signatures in the
/// source. Use [`type_of_with`] to declare them from the host side.
pub fn type_of(source: &str, _prims: &Env) -> Result<Signatures> {
    type_of_with(source, &Context::new())
}

/// Type of every top-level definition, checked under `ctx`
pub fn type_of_with(source: &str, ctx: &Context) -> Result<Signatures> {
    let module = parse_module(source)?;
    check(&module, ctx)
}

/// Check an already parsed module under `ctx`
pub fn check(module: &Module, ctx: &Context) -> Result<Signatures> {
    Ok(TypeChecker::with_context(ctx.clone()).check_module(module)?)
}

/// Core definitions of a source unit; signatures are dropped
pub fn elaborate(source: &str) -> Result<Definitions> {
    Ok(parse_module(source)?.definitions)
}

/// Evaluate core definitions in source order over `prims`
pub fn evaluate(defs: &Definitions, prims: &Env) -> Result<Ordered<Value>> {
    evaluate_with(&mut Evaluator::new(), defs, prims)
}

/// Evaluate with a configured evaluator
pub fn evaluate_with(evaluator: &mut Evaluator, defs: &Definitions, prims: &Env) -> Result<Ordered<Value>> {
    Ok(evaluator.eval_definitions(defs, prims)?)
}

/// Read and parse a source file
pub fn load(path: impl AsRef<Path>) -> Result<Module> {
    Ok(auric_parse::loader::load_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_type_of_ignores_primitives() {
        let src = "zero : Nat\nz = zero";
        let types = type_of(src, &standard_constructors()).unwrap();
        assert_eq!(types.get("z").unwrap().to_string(), "Nat");
        assert!(type_of("z = zero", &standard_constructors()).is_err());
    }

    #[test]
    fn test_type_of_with_constructor_signatures() {
        let types = type_of_with("two = succ (succ zero)", &constructor_signatures()).unwrap();
        assert_eq!(types.get("two").unwrap().to_string(), "Nat");
    }

    #[test]
    fn test_elaborate_drops_signatures() {
        let defs = elaborate("k : Nat\nk = zero\nf x = x").unwrap();
        assert_eq!(defs.names().collect::<Vec<_>>(), vec!["k", "f"]);
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(elaborate("f x ="), Err(Error::Parse(_))));
        assert!(matches!(type_of("bad = nope", &Env::new()), Err(Error::Type(_))));
        let defs = elaborate("bad = nope").unwrap();
        assert!(matches!(evaluate(&defs, &Env::new()), Err(Error::Eval(_))));
    }

    #[test]
    fn test_evaluate_with_depth() {
        let defs = elaborate("w x = x x\nboom = w w").unwrap();
        let err = evaluate_with(&mut Evaluator::new().with_max_depth(64), &defs, &Env::new()).unwrap_err();
        assert!(matches!(err, Error::Eval(ref e) if e.root() == &EvalError::RecursionLimit(64)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(load("/nonexistent/unit.au"), Err(Error::Load(_))));
    }
}
