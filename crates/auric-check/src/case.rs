//! Binder typing for case alternatives
//!
//! Which type each binder of an alternative receives is looked up in
//! [`BINDER_RULES`], keyed by the constructor tag and the base shape at the
//! head of the scrutinee's type. Only `cons` on `List a` has a rule: its
//! first binder is the element `a` and its second the list itself. Binders
//! without a rule are unconstrained (`Top`).

use auric_ast::expr::WILDCARD;
use auric_ast::types::Type;

/// Where a binder's type comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// The scrutinee type's n-th type argument
    Arg(usize),
    /// The scrutinee's own type
    Scrutinee,
}

/// Binder types for one constructor of one base shape
#[derive(Debug, Clone, Copy)]
pub struct BinderRule {
    pub base: &'static str,
    pub tag: &'static str,
    /// Number of type arguments the scrutinee type must carry
    pub type_args: usize,
    /// Types of the named binders, in order
    pub fields: &'static [FieldType],
}

pub static BINDER_RULES: &[BinderRule] = &[BinderRule {
    base: "List",
    tag: "cons",
    type_args: 1,
    fields: &[FieldType::Arg(0), FieldType::Scrutinee],
}];

/// The rule for `tag` applying to a scrutinee of type `scrutinee`, if any
pub fn rule_for(tag: &str, scrutinee: &Type) -> Option<&'static BinderRule> {
    let (head, args) = scrutinee.spine();
    let base = head.own_shape()?.base_name()?;
    BINDER_RULES
        .iter()
        .find(|r| r.tag == tag && r.base == base && r.type_args == args.len())
}

/// Types for the named (non-wildcard) binders of an alternative
pub fn binder_types<'b>(tag: &str, binders: &'b [Box<str>], scrutinee: &Type) -> Vec<(&'b str, Type)> {
    let rule = rule_for(tag, scrutinee);
    let (_, args) = scrutinee.spine();

    binders
        .iter()
        .map(|b| b.as_ref())
        .filter(|b| *b != WILDCARD)
        .enumerate()
        .map(|(i, name)| {
            let ty = match rule.and_then(|r| r.fields.get(i)) {
                Some(FieldType::Arg(n)) => args.get(*n).map(|t| (*t).clone()).unwrap_or_else(Type::top),
                Some(FieldType::Scrutinee) => scrutinee.clone(),
                None => Type::top(),
            };
            (name, ty)
        })
        .collect()
}
