//! Type checking context (Γ)

use auric_ast::scope::Scope;
use auric_ast::types::Type;

/// Type checking context: a persistent map from term names to types
#[derive(Debug, Clone, Default)]
pub struct Context {
    scope: Scope<Type>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Look up the type of a name
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scope.lookup(name)
    }

    /// Extended context; `self` is left untouched
    pub fn bind(&self, name: impl Into<Box<str>>, ty: Type) -> Context {
        Context { scope: self.scope.bind(name, ty) }
    }

    /// Extend in place, shadowing any earlier binding of `name`
    pub fn define(&mut self, name: impl Into<Box<str>>, ty: Type) {
        self.scope = self.scope.bind(name, ty);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scope.contains(name)
    }
}

impl<K: Into<Box<str>>> FromIterator<(K, Type)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, Type)>>(iter: I) -> Self {
        Context { scope: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_does_not_touch_outer() {
        let outer: Context = [("x", Type::base("Nat"))].into_iter().collect();
        let inner = outer.bind("x", Type::base("Bool"));
        assert_eq!(outer.lookup("x"), Some(&Type::base("Nat")));
        assert_eq!(inner.lookup("x"), Some(&Type::base("Bool")));
        assert!(!inner.contains("y"));
    }

    #[test]
    fn test_define_shadows() {
        let mut ctx = Context::new();
        ctx.define("f", Type::base("Nat"));
        ctx.define("f", Type::base("List"));
        assert_eq!(ctx.lookup("f"), Some(&Type::base("List")));
    }
}
