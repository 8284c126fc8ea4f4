//! Type variable substitution
//!
//! `subst(ty, var, replacement)` replaces every occurrence of `var` in the
//! tree, including occurrences under a quantifier that rebinds `var`.
//! Quantifiers are never renamed, so a variable free in `replacement` can be
//! captured by a binder inside `ty`. Both are known soundness gaps.

use auric_ast::types::Type;

/// Replace `var` with `replacement` throughout `ty`
pub fn subst(ty: &Type, var: &str, replacement: &Type) -> Type {
    match ty {
        Type::Var(name) if name.as_ref() == var => replacement.clone(),
        Type::Var(_) | Type::Shape(_) | Type::Refined(..) => ty.clone(),
        Type::Arrow(param, ret) => Type::arrow(subst(param, var, replacement), subst(ret, var, replacement)),
        Type::Forall(tv, body) => Type::forall(tv.clone(), subst(body, var, replacement)),
        Type::App(head, arg) => Type::app(subst(head, var, replacement), subst(arg, var, replacement)),
    }
}
