//! Type synthesis (inference mode)

use auric_ast::expr::{Alt, Expr};
use auric_ast::shape::{ctors, Shape};
use auric_ast::types::Type;
use tracing::trace;

use crate::case::binder_types;
use crate::check::check_with;
use crate::context::Context;
use crate::error::{TypeError, TypeResult};
use crate::subst::subst;
use crate::subtype::{Implication, SyntacticImplication};

/// Synthesize the type of an expression
pub fn synth(ctx: &Context, expr: &Expr) -> TypeResult<Type> {
    synth_with(&SyntacticImplication, ctx, expr)
}

/// Synthesize, deciding refinement implications with `imp`
pub fn synth_with(imp: &dyn Implication, ctx: &Context, expr: &Expr) -> TypeResult<Type> {
    let ty = match expr {
        Expr::Var(name) => ctx
            .lookup(name)
            .cloned()
            .ok_or_else(|| TypeError::UnboundVariable(name.to_string()))?,

        // ============ Application ============
        Expr::App(func, arg) => match synth_with(imp, ctx, func)? {
            Type::Arrow(param, ret) => {
                check_with(imp, ctx, arg, &param)?;
                *ret
            }
            other => return Err(TypeError::NotAFunction(other)),
        },

        // ============ Type application ============
        Expr::TyApp(func, supplied) => match synth_with(imp, ctx, func)? {
            Type::Forall(tv, body) => subst(&body, &tv, supplied),
            other => return Err(TypeError::NotGeneric(other)),
        },

        Expr::Case { scrutinee, alts } => synth_case(imp, ctx, scrutinee, alts)?,

        Expr::Lam(..) => return Err(TypeError::NeedsAnnotation("lambda")),
        Expr::TyAbs(..) => return Err(TypeError::NeedsAnnotation("type abstraction")),
    };

    trace!(expr = %expr, ty = %ty, "synth");
    Ok(ty)
}

/// Every alternative's tag must be a constructor of the scrutinee's shape,
/// and every branch must synthesize exactly the first branch's type
fn synth_case(imp: &dyn Implication, ctx: &Context, scrutinee: &Expr, alts: &[Alt]) -> TypeResult<Type> {
    let scrutinee_ty = synth_with(imp, ctx, scrutinee)?;
    let shape = scrutinee_ty
        .constructor_shape()
        .ok_or_else(|| TypeError::NoConstructorShape(scrutinee_ty.clone()))?;
    let tags = ctors(shape);

    let mut first: Option<(&str, Type)> = None;
    for alt in alts {
        if !tags.contains(&*alt.tag) {
            return Err(TypeError::UnknownConstructor { tag: alt.tag.to_string(), shape: shape.clone() });
        }

        let local = binder_types(&alt.tag, &alt.binders, &scrutinee_ty)
            .into_iter()
            .fold(ctx.clone(), |acc, (name, ty)| acc.bind(name, ty));
        let branch = synth_with(imp, &local, &alt.body)?;

        if let Some((first_tag, first_ty)) = &first {
            if *first_ty != branch {
                return Err(TypeError::BranchMismatch {
                    first_tag: first_tag.to_string(),
                    first: first_ty.clone(),
                    tag: alt.tag.to_string(),
                    found: branch,
                });
            }
            continue;
        }
        first = Some((&*alt.tag, branch));
    }

    // No alternatives: nothing can reach the result
    Ok(first.map(|(_, ty)| ty).unwrap_or_else(|| Type::shape(Shape::Bot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auric_parse::prelude::{parse_expr, parse_type};

    fn ctx() -> Context {
        [
            ("zero", "Nat"),
            ("true", "Bool"),
            ("nil", "∀a. List a"),
            ("cons", "∀a. a -> List a -> List a"),
            ("xs", "List Nat"),
            ("bs", "Bool"),
            ("f", "Nat -> Bool"),
        ]
        .into_iter()
        .map(|(n, t)| (n, parse_type(t).unwrap()))
        .collect()
    }

    fn synth_src(src: &str) -> TypeResult<Type> {
        synth(&ctx(), &parse_expr(src).unwrap())
    }

    #[test]
    fn test_variable() {
        assert_eq!(synth_src("zero").unwrap(), Type::base("Nat"));
        assert_eq!(synth_src("ys").unwrap_err(), TypeError::UnboundVariable("ys".into()));
    }

    #[test]
    fn test_application() {
        assert_eq!(synth_src("f zero").unwrap(), Type::base("Bool"));
        assert!(matches!(synth_src("f true"), Err(TypeError::Mismatch { .. })));
        assert!(matches!(synth_src("zero f"), Err(TypeError::NotAFunction(_))));
    }

    #[test]
    fn test_type_application() {
        assert_eq!(synth_src("nil[Nat]").unwrap(), parse_type("List Nat").unwrap());
        assert_eq!(synth_src("cons[Nat] zero nil[Nat]").unwrap(), parse_type("List Nat").unwrap());
        assert!(matches!(synth_src("zero[Nat]"), Err(TypeError::NotGeneric(_))));
    }

    #[test]
    fn test_case_binds_cons_fields() {
        let ty = synth_src("case xs of\n  cons x t -> x").unwrap();
        assert_eq!(ty, Type::base("Nat"));
        let ty = synth_src("case xs of\n  cons x t -> t").unwrap();
        assert_eq!(ty, parse_type("List Nat").unwrap());
        // The first named binder is the element, wherever it sits
        let ty = synth_src("case xs of\n  cons _ t -> t").unwrap();
        assert_eq!(ty, Type::base("Nat"));
    }

    #[test]
    fn test_case_unknown_constructor() {
        let err = synth_src("case xs of succ n -> zero").unwrap_err();
        assert_eq!(err, TypeError::UnknownConstructor { tag: "succ".into(), shape: Shape::base("List") });
    }

    #[test]
    fn test_case_branch_mismatch() {
        let err = synth_src("case bs of\n  true -> zero\n  false -> bs").unwrap_err();
        assert!(matches!(err, TypeError::BranchMismatch { ref first_tag, ref tag, .. } if first_tag == "true" && tag == "false"));
    }

    #[test]
    fn test_case_branches_agree() {
        assert_eq!(synth_src("case bs of\n  true -> zero\n  false -> zero").unwrap(), Type::base("Nat"));
    }

    #[test]
    fn test_case_on_function_has_no_shape() {
        let err = synth_src("case f of true -> zero").unwrap_err();
        assert!(matches!(err, TypeError::NoConstructorShape(_)));
    }

    #[test]
    fn test_empty_case_is_bottom() {
        let e = Expr::case(Expr::var("xs"), vec![]);
        assert_eq!(synth(&ctx(), &e).unwrap(), Type::shape(Shape::Bot));
    }

    #[test]
    fn test_lambda_needs_annotation() {
        let err = synth(&ctx(), &Expr::lam("x", Expr::var("x"))).unwrap_err();
        assert_eq!(err.to_string(), "lambda needs an annotation");
    }
}
