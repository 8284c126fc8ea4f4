//! Type checking (checking mode)

use auric_ast::expr::Expr;
use auric_ast::types::Type;
use tracing::trace;

use crate::context::Context;
use crate::error::{TypeError, TypeResult};
use crate::infer::synth_with;
use crate::subtype::{leq_type_with, Implication, SyntacticImplication};

/// Check that an expression has the expected type
pub fn check(ctx: &Context, expr: &Expr, expected: &Type) -> TypeResult<()> {
    check_with(&SyntacticImplication, ctx, expr, expected)
}

/// Check against `expected`, deciding refinement implications with `imp`
pub fn check_with(imp: &dyn Implication, ctx: &Context, expr: &Expr, expected: &Type) -> TypeResult<()> {
    trace!(expr = %expr, expected = %expected, "check");

    match (expr, expected) {
        // ============ Lambda against arrow ============
        (Expr::Lam(arg, body), Type::Arrow(param, ret)) => {
            let inner = ctx.bind(arg.clone(), param.as_ref().clone());
            check_with(imp, &inner, body, ret)
        }

        // ============ Type abstraction against quantifier ============
        // The bound variable is not substituted; the body is checked as is
        (Expr::TyAbs(_, body), Type::Forall(_, inner)) => check_with(imp, ctx, body, inner),

        // ============ Subsumption ============
        _ => {
            let found = synth_with(imp, ctx, expr)?;
            if leq_type_with(imp, &found, expected) {
                Ok(())
            } else {
                Err(TypeError::Mismatch { expected: expected.clone(), found })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auric_ast::shape::Shape;
    use auric_parse::prelude::{parse_expr, parse_type};

    fn ctx() -> Context {
        [
            ("zero", parse_type("Nat").unwrap()),
            ("nil", parse_type("∀a. List a").unwrap()),
            ("n", parse_type("{ Nat n > 0 }").unwrap()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lambda_against_arrow() {
        let id = Expr::lam("x", parse_expr("(x)").unwrap());
        assert!(check(&ctx(), &id, &parse_type("Nat -> Nat").unwrap()).is_ok());
        assert!(check(&ctx(), &id, &parse_type("Nat -> List ∪ Nat").unwrap()).is_ok());
        assert!(check(&ctx(), &id, &parse_type("List ∪ Nat -> Nat").unwrap()).is_err());
    }

    #[test]
    fn test_type_abstraction_against_forall() {
        let e = Expr::ty_abs("a", Expr::lam("x", Expr::var("x")));
        assert!(check(&ctx(), &e, &parse_type("∀a. a -> a").unwrap()).is_ok());
    }

    #[test]
    fn test_subsumption_into_union() {
        let ty = Type::shape(Shape::union(Shape::base("Nat"), Shape::base("Bool")));
        assert!(check(&ctx(), &Expr::var("zero"), &ty).is_ok());
    }

    #[test]
    fn test_refinement_subsumption() {
        assert!(check(&ctx(), &Expr::var("n"), &parse_type("{ Nat n > 0 }").unwrap()).is_ok());
        assert!(check(&ctx(), &Expr::var("n"), &parse_type("{ Nat }").unwrap()).is_ok());
        let err = check(&ctx(), &Expr::var("zero"), &parse_type("{ Nat n > 0 }").unwrap()).unwrap_err();
        assert!(matches!(err, TypeError::Mismatch { .. }));
    }

    #[test]
    fn test_mismatch_names_both_types() {
        let err = check(&ctx(), &Expr::var("zero"), &Type::base("List")).unwrap_err();
        assert_eq!(err, TypeError::Mismatch { expected: Type::base("List"), found: Type::base("Nat") });
        assert_eq!(err.to_string(), "Type mismatch: expected List, found Nat");
    }

    #[test]
    fn test_lambda_against_non_arrow_needs_annotation() {
        let err = check(&ctx(), &Expr::lam("x", Expr::var("x")), &Type::base("Nat")).unwrap_err();
        assert!(matches!(err, TypeError::NeedsAnnotation(_)));
    }
}
