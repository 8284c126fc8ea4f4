//! Type checking errors

use auric_ast::shape::Shape;
use auric_ast::types::Type;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    Mismatch {
        expected: Type,
        found: Type,
    },

    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Not a function type: {0}")]
    NotAFunction(Type),

    #[error("Type application of a non-generic value of type {0}")]
    NotGeneric(Type),

    #[error("Case scrutinee of type {0} has no constructor shape")]
    NoConstructorShape(Type),

    #[error("Constructor '{tag}' is not in shape {shape}")]
    UnknownConstructor {
        tag: String,
        shape: Shape,
    },

    #[error("Case branches disagree: '{first_tag}' has type {first}, '{tag}' has type {found}")]
    BranchMismatch {
        first_tag: String,
        first: Type,
        tag: String,
        found: Type,
    },

    #[error("{0} needs an annotation")]
    NeedsAnnotation(&'static str),

    #[error("In definition '{name}': {source}")]
    InDefinition {
        name: String,
        #[source]
        source: Box<TypeError>,
    },
}

pub type TypeResult<T> = Result<T, TypeError>;

impl TypeError {
    pub fn in_definition(self, name: &str) -> Self {
        TypeError::InDefinition { name: name.to_string(), source: Box::new(self) }
    }

    /// The error underneath any definition wrappers
    pub fn root(&self) -> &TypeError {
        match self {
            TypeError::InDefinition { source, .. } => source.root(),
            other => other,
        }
    }
}
