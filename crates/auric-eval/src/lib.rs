//! # Auric Eval - Interpreter for the Auric core calculus
//!
//! Type-erased, environment-passing evaluation. Constructors and any other
//! host operations are supplied as values in the initial environment.

pub mod value;
pub mod error;
pub mod eval;

pub mod prelude {
    pub use crate::value::{Value, Closure, TyClosure, Native, NativeFn, Env};
    pub use crate::error::{EvalError, EvalResult};
    pub use crate::eval::{Evaluator, eval, DEFAULT_MAX_DEPTH};
}
