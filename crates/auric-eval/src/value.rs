//! Runtime values for Auric

use std::fmt;
use std::rc::Rc;

use auric_ast::expr::Expr;
use auric_ast::scope::Scope;

use crate::error::EvalResult;

/// Host function body: receives exactly `arity` arguments
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult<Value>;

#[derive(Debug, Clone)]
pub enum Value {
    /// Host scalar, opaque to the core calculus
    Int(i64),
    /// Tagged record built by a constructor
    Data { tag: Box<str>, fields: Vec<Value> },
    /// Value abstraction with its defining environment
    Closure(Rc<Closure>),
    /// Type abstraction; its type argument is ignored
    TyClosure(Rc<TyClosure>),
    /// Host function awaiting all of its arguments
    Native(Rc<Native>),
    /// Host function applied to some of its arguments
    Partial { func: Rc<Native>, args: Vec<Value> },
}

#[derive(Debug, Clone)]
pub struct Closure {
    pub param: Box<str>,
    pub body: Expr,
    pub env: Env,
}

#[derive(Debug, Clone)]
pub struct TyClosure {
    pub tv: Box<str>,
    pub body: Expr,
    pub env: Env,
}

pub struct Native {
    pub name: Box<str>,
    pub arity: usize,
    pub func: Box<NativeFn>,
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Native").field("name", &self.name).field("arity", &self.arity).finish()
    }
}

/// Runtime environment: a persistent map from names to values
#[derive(Debug, Clone, Default)]
pub struct Env {
    scope: Scope<Value>,
}

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scope.lookup(name)
    }

    /// Extended environment; `self` is left untouched
    pub fn bind(&self, name: impl Into<Box<str>>, value: Value) -> Env {
        Env { scope: self.scope.bind(name, value) }
    }

    /// Extend in place, shadowing any earlier binding of `name`
    pub fn define(&mut self, name: impl Into<Box<str>>, value: Value) {
        self.scope = self.scope.bind(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scope.contains(name)
    }
}

impl<K: Into<Box<str>>> FromIterator<(K, Value)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Env { scope: iter.into_iter().collect() }
    }
}

impl Value {
    pub fn int(n: i64) -> Self { Value::Int(n) }

    pub fn data(tag: impl Into<Box<str>>, fields: Vec<Value>) -> Self {
        Value::Data { tag: tag.into(), fields }
    }

    /// A constructor with no fields
    pub fn tag(tag: impl Into<Box<str>>) -> Self {
        Value::data(tag, Vec::new())
    }

    pub fn closure(param: impl Into<Box<str>>, body: Expr, env: Env) -> Self {
        Value::Closure(Rc::new(Closure { param: param.into(), body, env }))
    }

    pub fn ty_closure(tv: impl Into<Box<str>>, body: Expr, env: Env) -> Self {
        Value::TyClosure(Rc::new(TyClosure { tv: tv.into(), body, env }))
    }

    /// Curried host function of `arity` arguments (at least one)
    pub fn native(
        name: impl Into<Box<str>>,
        arity: usize,
        func: impl Fn(&[Value]) -> EvalResult<Value> + 'static,
    ) -> Self {
        Value::Native(Rc::new(Native { name: name.into(), arity: arity.max(1), func: Box::new(func) }))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::TyClosure(_) | Value::Native(_) | Value::Partial { .. })
    }

    fn is_atomic(&self) -> bool {
        match self {
            Value::Data { fields, .. } => fields.is_empty(),
            _ => true,
        }
    }
}

/// Data compares structurally; functions compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Data { tag: t1, fields: f1 }, Value::Data { tag: t2, fields: f2 }) => t1 == t2 && f1 == f2,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::TyClosure(a), Value::TyClosure(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Partial { func: f1, args: a1 }, Value::Partial { func: f2, args: a2 }) => {
                Rc::ptr_eq(f1, f2) && a1 == a2
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Data { tag, fields } => {
                write!(f, "{}", tag)?;
                for field in fields {
                    if field.is_atomic() {
                        write!(f, " {}", field)?;
                    } else {
                        write!(f, " ({})", field)?;
                    }
                }
                Ok(())
            }
            Value::Closure(c) => write!(f, "<closure λ{}>", c.param),
            Value::TyClosure(c) => write!(f, "<closure Λ{}>", c.tv),
            Value::Native(n) => write!(f, "<native {}/{}>", n.name, n.arity),
            Value::Partial { func, args } => write!(f, "<partial {} {}/{}>", func.name, args.len(), func.arity),
        }
    }
}
