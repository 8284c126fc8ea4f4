//! Error handling for Auric evaluation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("No alternative for constructor '{tag}'")]
    NoMatchingAlternative { tag: String },

    #[error("Case scrutinee is not a tagged value: {0}")]
    NotATaggedValue(String),

    #[error("Not callable: {0}")]
    NotCallable(String),

    #[error("Recursion limit exceeded (depth {0})")]
    RecursionLimit(usize),

    #[error("Native '{name}' failed: {message}")]
    Native { name: String, message: String },

    #[error("In definition '{name}': {source}")]
    InDefinition {
        name: String,
        #[source]
        source: Box<EvalError>,
    },
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub fn native(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Native { name: name.into(), message: message.into() }
    }

    pub fn in_definition(self, name: &str) -> Self {
        EvalError::InDefinition { name: name.to_string(), source: Box::new(self) }
    }

    /// The error underneath any definition wrappers
    pub fn root(&self) -> &EvalError {
        match self {
            EvalError::InDefinition { source, .. } => source.root(),
            other => other,
        }
    }
}

pub trait OptionExt<T> {
    fn ok_or_unbound(self, name: &str) -> EvalResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unbound(self, name: &str) -> EvalResult<T> {
        self.ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }
}
