//! End-to-end pipeline tests
//!
//! Source text → elaborate → type_of / evaluate, with constructors supplied
//! by the host.

use auric::prelude::*;
use auric::Error;
use auric_check::TypeError;
use auric_parse::prelude::{parse_module, parse_type};
use std::path::PathBuf;

/// Host environment with just the list constructors
fn list_prims() -> Env {
    [
        ("nil", Value::tag("nil")),
        ("cons", Value::native("cons", 2, |args| Ok(Value::data("cons", args.to_vec())))),
    ]
    .into_iter()
    .collect()
}

fn cons_42_nil() -> Value {
    Value::data("cons", vec![Value::int(42), Value::tag("nil")])
}

fn type_error(result: auric::Result<Signatures>) -> TypeError {
    match result {
        Err(Error::Type(e)) => e.root().clone(),
        other => panic!("expected a type error, got {:?}", other),
    }
}

// ============ Scenarios ============

#[test]
fn test_scenario_non_nil_head() {
    let defs = auric::elaborate("nonNilHead xs = case xs of cons x _ -> x").unwrap();
    let values = auric::evaluate(&defs, &list_prims()).unwrap();
    let head = values.get("nonNilHead").unwrap().clone();
    assert_eq!(Evaluator::new().apply(head, cons_42_nil()).unwrap(), Value::int(42));
}

#[test]
fn test_scenario_generic_head() {
    let src = "head : ∀a. List a -> a\nhead[a] xs = case xs of cons x _ -> x";
    let types = auric::type_of(src, &list_prims()).unwrap();
    assert_eq!(types.get("head"), Some(&parse_type("∀a. List a -> a").unwrap()));

    let values = auric::evaluate(&auric::elaborate(src).unwrap(), &list_prims()).unwrap();
    let head = values.get("head").unwrap().clone();
    let mut ev = Evaluator::new();

    let instance = ev.apply_type(head.clone()).unwrap();
    assert_eq!(ev.apply(instance, cons_42_nil()).unwrap(), Value::int(42));

    // A placeholder value works as the erased type argument
    let instance = ev.apply(head, Value::tag("placeholder")).unwrap();
    assert_eq!(ev.apply(instance, cons_42_nil()).unwrap(), Value::int(42));
}

#[test]
fn test_scenario_constructor_not_in_shape() {
    let err = type_error(auric::type_of("bad : List -> Nat\nbad xs = case xs of succ n -> n", &Env::new()));
    assert_eq!(err, TypeError::UnknownConstructor { tag: "succ".into(), shape: Shape::base("List") });
}

#[test]
fn test_scenario_branch_mismatch() {
    let src = "\
bad : Bool -> Bool
bad b = case b of
  true -> zero
  false -> false";
    let err = type_error(auric::type_of_with(src, &constructor_signatures()));
    assert!(matches!(err, TypeError::BranchMismatch { ref tag, .. } if tag == "false"));
}

#[test]
fn test_identity_returns_its_argument() {
    let defs = auric::elaborate("id x = x").unwrap();
    assert!(matches!(defs.get("id"), Some(Expr::Lam(param, _)) if &**param == "x"));

    for prims in [Env::new(), list_prims(), standard_constructors()] {
        let id = auric::evaluate(&defs, &prims).unwrap().get("id").unwrap().clone();
        for v in [Value::int(7), Value::tag("nil"), cons_42_nil()] {
            assert_eq!(Evaluator::new().apply(id.clone(), v.clone()).unwrap(), v);
        }
    }
}

// ============ Determinism ============

#[test]
fn test_parsing_is_deterministic() {
    let src = "head : ∀a. List a -> a\nhead[a] xs = case xs of cons x _ -> x";
    assert_eq!(parse_module(src).unwrap(), parse_module(src).unwrap());
}

#[test]
fn test_printed_types_reparse() {
    let sources = [
        "∀a. List a -> a",
        "(Nat -> Nat) -> Nat",
        "{ Nat n > 0 } -> Bool",
        "(List ∪ Nat) ∩ Bool",
        "(List \\ nil) \\ cons",
        "∀a. ∀b. (a -> b) -> List a -> List b",
    ];
    for src in sources {
        let ty = parse_type(src).unwrap();
        for config in [PrettyConfig::default(), PrettyConfig::ascii()] {
            let printed = print_type(&ty, &config);
            assert_eq!(parse_type(&printed).unwrap(), ty, "reparsing {printed}");
        }
    }
}

// ============ Source Files ============

fn program(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/programs").join(name)
}

#[test]
fn test_lists_program() {
    let module = auric::load(program("lists.au")).unwrap();

    let types = auric::check(&module, &constructor_signatures()).unwrap();
    assert_eq!(types.get("rest").unwrap().to_string(), "List Nat");
    assert_eq!(types.len(), module.definitions.len());

    let values = auric::evaluate(&module.definitions, &standard_constructors()).unwrap();
    assert_eq!(values.get("first").unwrap().to_string(), "succ zero");
    assert_eq!(values.get("rest").unwrap().to_string(), "cons zero nil");
    assert_eq!(values.get("empty"), Some(&Value::tag("true")));
}

#[test]
fn test_missing_program() {
    assert!(matches!(auric::load(program("absent.au")), Err(Error::Load(_))));
}
