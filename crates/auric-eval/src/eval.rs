//! Evaluator for Auric
//!
//! Environment-passing evaluation of core terms. Environments are extended
//! by binding, never mutated, so every closure keeps the frame it was
//! created in. Types are erased: a type abstraction evaluates its body in
//! the unchanged environment whatever type it is applied to.

use auric_ast::decl::{Definitions, Ordered};
use auric_ast::expr::{Alt, Expr, WILDCARD};
use std::rc::Rc;
use tracing::{debug, trace};

use crate::error::{EvalError, EvalResult, OptionExt};
use crate::value::{Env, Native, Value};

/// Default bound on evaluation nesting
///
/// Sized so a debug build stays inside a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Evaluator {
    max_depth: usize,
    depth: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator { max_depth: DEFAULT_MAX_DEPTH, depth: 0 }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self { self.max_depth = depth; self }

    /// Evaluate an expression in `env`
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        self.depth += 1;
        if self.depth > self.max_depth {
            self.depth -= 1;
            return Err(EvalError::RecursionLimit(self.max_depth));
        }
        trace!(depth = self.depth, expr = %expr, "eval");
        let result = self.eval_inner(expr, env);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        match expr {
            Expr::Var(name) => env.lookup(name).cloned().ok_or_unbound(name),
            Expr::Lam(param, body) => Ok(Value::closure(param.clone(), (**body).clone(), env.clone())),
            Expr::TyAbs(tv, body) => Ok(Value::ty_closure(tv.clone(), (**body).clone(), env.clone())),
            Expr::App(func, arg) => {
                let func_val = self.eval(func, env)?;
                let arg_val = self.eval(arg, env)?;
                self.apply(func_val, arg_val)
            }
            Expr::TyApp(func, _) => {
                let func_val = self.eval(func, env)?;
                self.apply_type(func_val)
            }
            Expr::Case { scrutinee, alts } => {
                let val = self.eval(scrutinee, env)?;
                self.eval_case(val, alts, env)
            }
        }
    }

    /// Select the alternative for the scrutinee's tag and bind its fields
    /// positionally; `_` binders skip their field
    fn eval_case(&mut self, val: Value, alts: &[Alt], env: &Env) -> EvalResult<Value> {
        let (tag, fields) = match val {
            Value::Data { tag, fields } => (tag, fields),
            other => return Err(EvalError::NotATaggedValue(other.to_string())),
        };
        let alt = Expr::alternative(alts, &tag)
            .ok_or_else(|| EvalError::NoMatchingAlternative { tag: tag.to_string() })?;

        let local = alt
            .binders
            .iter()
            .zip(fields)
            .filter(|(name, _)| &***name != WILDCARD)
            .fold(env.clone(), |acc, (name, field)| acc.bind(name.clone(), field));
        self.eval(&alt.body, &local)
    }

    /// Apply a function value to an argument
    pub fn apply(&mut self, func: Value, arg: Value) -> EvalResult<Value> {
        match func {
            Value::Closure(closure) => {
                let env = closure.env.bind(closure.param.clone(), arg);
                self.eval(&closure.body, &env)
            }
            // Erased: a value argument stands in for the type argument
            Value::TyClosure(closure) => self.eval(&closure.body, &closure.env),
            Value::Native(native) => self.apply_native(native, vec![arg]),
            Value::Partial { func, mut args } => {
                args.push(arg);
                self.apply_native(func, args)
            }
            other => Err(EvalError::NotCallable(other.to_string())),
        }
    }

    /// Apply a value to a (erased) type argument
    ///
    /// Values that are not type abstractions pass through unchanged.
    pub fn apply_type(&mut self, func: Value) -> EvalResult<Value> {
        match func {
            Value::TyClosure(closure) => self.eval(&closure.body, &closure.env),
            other => Ok(other),
        }
    }

    fn apply_native(&mut self, native: Rc<Native>, args: Vec<Value>) -> EvalResult<Value> {
        if args.len() < native.arity {
            return Ok(Value::Partial { func: native, args });
        }
        trace!(native = %native.name, "call");
        (native.func)(&args)
    }

    /// Evaluate definitions in source order
    ///
    /// Each definition sees `prims` plus the definitions before it.
    pub fn eval_definitions(&mut self, defs: &Definitions, prims: &Env) -> EvalResult<Ordered<Value>> {
        let mut env = prims.clone();
        let mut results = Ordered::new();
        for (name, expr) in defs.iter() {
            let value = self.eval(expr, &env).map_err(|e| e.in_definition(name))?;
            debug!(name, value = %value, "evaluated definition");
            env.define(name, value.clone());
            results.insert(name, value);
        }
        Ok(results)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate an expression with a fresh evaluator
pub fn eval(expr: &Expr, env: &Env) -> EvalResult<Value> {
    Evaluator::new().eval(expr, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auric_parse::prelude::{parse_expr, parse_module};

    fn cons() -> Value {
        Value::native("cons", 2, |args| Ok(Value::data("cons", args.to_vec())))
    }

    fn prims() -> Env {
        [("nil", Value::tag("nil")), ("cons", cons())].into_iter().collect()
    }

    fn list(items: &[i64]) -> Value {
        items
            .iter()
            .rev()
            .fold(Value::tag("nil"), |tail, n| Value::data("cons", vec![Value::int(*n), tail]))
    }

    fn run(src: &str, env: &Env) -> EvalResult<Value> {
        eval(&parse_expr(src).unwrap(), env)
    }

    #[test]
    fn test_identity() {
        let env = prims().bind("v", Value::int(7));
        assert_eq!(run("(Λa. v)[Nat]", &env).unwrap(), Value::int(7));
        let mut ev = Evaluator::new();
        let id = ev.eval(&Expr::lam("x", Expr::var("x")), &env).unwrap();
        assert_eq!(ev.apply(id, Value::tag("zero")).unwrap(), Value::tag("zero"));
    }

    #[test]
    fn test_constructor_application() {
        assert_eq!(run("cons a (cons b nil)", &prims().bind("a", Value::int(1)).bind("b", Value::int(2))).unwrap(), list(&[1, 2]));
    }

    #[test]
    fn test_partial_native() {
        let env = prims().bind("one", Value::int(1));
        let partial = run("cons one", &env).unwrap();
        assert!(matches!(partial, Value::Partial { ref args, .. } if args.len() == 1));
        let full = Evaluator::new().apply(partial, Value::tag("nil")).unwrap();
        assert_eq!(full, list(&[1]));
    }

    #[test]
    fn test_case_binds_fields_in_order() {
        let env = prims().bind("xs", list(&[4, 5]));
        assert_eq!(run("case xs of cons x _ -> x", &env).unwrap(), Value::int(4));
        assert_eq!(run("case xs of cons _ t -> t", &env).unwrap(), list(&[5]));
    }

    #[test]
    fn test_case_missing_alternative() {
        let env = prims().bind("xs", Value::tag("nil"));
        let err = run("case xs of cons x _ -> x", &env).unwrap_err();
        assert_eq!(err, EvalError::NoMatchingAlternative { tag: "nil".into() });
    }

    #[test]
    fn test_case_on_function() {
        let err = run("case cons of nil -> nil", &prims()).unwrap_err();
        assert!(matches!(err, EvalError::NotATaggedValue(_)));
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(run("ys", &prims()).unwrap_err(), EvalError::UnboundVariable("ys".into()));
    }

    #[test]
    fn test_not_callable() {
        assert!(matches!(run("nil nil", &prims()), Err(EvalError::NotCallable(_))));
    }

    #[test]
    fn test_type_application_is_erased() {
        let mut ev = Evaluator::new();
        let env = prims();
        let k = ev.eval(&parse_expr("Λa. nil").unwrap(), &env).unwrap();
        assert_eq!(ev.apply_type(k.clone()).unwrap(), Value::tag("nil"));
        assert_eq!(ev.apply(k, Value::tag("placeholder")).unwrap(), Value::tag("nil"));
        assert_eq!(ev.apply_type(Value::int(3)).unwrap(), Value::int(3));
    }

    #[test]
    fn test_closures_capture_their_environment() {
        let module = parse_module("k x y = x\nfirst = k a").unwrap();
        let env = prims().bind("a", Value::int(1)).bind("b", Value::int(2));
        let values = Evaluator::new().eval_definitions(&module.definitions, &env).unwrap();
        let first = values.get("first").unwrap().clone();
        assert_eq!(Evaluator::new().apply(first, Value::int(9)).unwrap(), Value::int(1));
    }

    #[test]
    fn test_definitions_in_order() {
        let module = parse_module("a = nil\nb = cons a a\nc = zzz").unwrap();
        let err = Evaluator::new().eval_definitions(&module.definitions, &prims()).unwrap_err();
        assert!(matches!(err, EvalError::InDefinition { ref name, .. } if name == "c"));
        assert_eq!(err.root(), &EvalError::UnboundVariable("zzz".into()));
    }

    fn nested_identity(n: usize) -> Expr {
        (0..n).fold(Expr::var("nil"), |inner, _| Expr::app(Expr::lam("x", Expr::var("x")), inner))
    }

    #[test]
    fn test_default_limit_fits_a_small_thread_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let under = eval(&nested_identity(DEFAULT_MAX_DEPTH - 1), &prims()).map(|v| v.to_string());
                let over = eval(&nested_identity(DEFAULT_MAX_DEPTH), &prims()).map(|v| v.to_string());
                (under, over)
            })
            .unwrap();
        let (under, over) = handle.join().unwrap();
        assert_eq!(under, Ok("nil".to_string()));
        assert_eq!(over, Err(EvalError::RecursionLimit(DEFAULT_MAX_DEPTH)));
    }

    #[test]
    fn test_recursion_limit() {
        let module = parse_module("w x = x x\nboom = w w").unwrap();
        let err = Evaluator::new().with_max_depth(200).eval_definitions(&module.definitions, &prims()).unwrap_err();
        assert_eq!(err.root(), &EvalError::RecursionLimit(200));
    }
}
