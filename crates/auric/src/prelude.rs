//! Standard constructors
//!
//! Runtime values and checker signatures for every tag in the constructor
//! registry. Nullary tags are plain tagged values; the rest are curried
//! natives that build a tagged value once all fields are supplied.

pub use auric_ast::prelude::*;
pub use auric_check::{Context, TypeChecker};
pub use auric_eval::prelude::*;

/// Number of fields carried by a registered constructor tag
pub fn arity(tag: &str) -> usize {
    match tag {
        "succ" => 1,
        "cons" => 2,
        _ => 0,
    }
}

/// Runtime environment binding every registered constructor
pub fn standard_constructors() -> Env {
    CONSTRUCTORS
        .iter()
        .flat_map(|(_, tags)| tags.iter())
        .map(|&tag| (tag, constructor(tag)))
        .collect()
}

fn constructor(tag: &'static str) -> Value {
    match arity(tag) {
        0 => Value::tag(tag),
        n => Value::native(tag, n, move |args| Ok(Value::data(tag, args.to_vec()))),
    }
}

/// Checker context declaring the type of every registered constructor
pub fn constructor_signatures() -> Context {
    let nat = || Type::base("Nat");
    let bool_ = || Type::base("Bool");
    let list_of = |a: &str| Type::app(Type::base("List"), Type::var(a));

    [
        ("zero", nat()),
        ("succ", Type::arrow(nat(), nat())),
        ("true", bool_()),
        ("false", bool_()),
        ("nil", Type::forall("a", list_of("a"))),
        ("cons", Type::forall("a", Type::arrow_n([Type::var("a"), list_of("a")], list_of("a")))),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_tag_is_bound() {
        let env = standard_constructors();
        let ctx = constructor_signatures();
        for (_, tags) in CONSTRUCTORS {
            for tag in tags.iter() {
                assert!(env.contains(tag), "no value for {tag}");
                assert!(ctx.contains(tag), "no type for {tag}");
            }
        }
    }

    #[test]
    fn test_constructor_values() {
        let env = standard_constructors();
        assert_eq!(env.lookup("nil"), Some(&Value::tag("nil")));
        let mut ev = Evaluator::new();
        let cons = env.lookup("cons").unwrap().clone();
        let partial = ev.apply(cons, Value::int(42)).unwrap();
        let list = ev.apply(partial, Value::tag("nil")).unwrap();
        assert_eq!(list.to_string(), "cons 42 nil");
    }

    #[test]
    fn test_constructor_signatures() {
        let ctx = constructor_signatures();
        assert_eq!(ctx.lookup("cons").unwrap().to_string(), "∀a. a → List a → List a");
        assert_eq!(ctx.lookup("succ").unwrap().to_string(), "Nat → Nat");
    }
}
