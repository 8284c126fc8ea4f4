//! # Auric AST
//!
//! Data model for the Auric language front-end:
//! - Constructor shapes and the process-wide constructor registry
//! - The type language (shapes, refinements, arrows, quantifiers, application)
//! - Core terms with constructor-tag case analysis
//! - Elaborated modules (signatures and definitions, in source order)
//! - Persistent scopes shared by the checker and the evaluator
//!
//! ## Example
//!
//! ```rust
//! use auric_ast::prelude::*;
//!
//! // ∀a. List a → a
//! let head = Type::forall(
//!     "a",
//!     Type::arrow(Type::app(Type::base("List"), Type::var("a")), Type::var("a")),
//! );
//! assert_eq!(head.to_string(), "∀a. List a → a");
//! assert!(ctors(&Shape::base("List")).contains("cons"));
//! ```

pub mod shape;
pub mod types;
pub mod expr;
pub mod decl;
pub mod scope;
pub mod pretty;
pub mod ser;

/// Prelude - common imports
pub mod prelude {
    pub use crate::shape::{Shape, ctors, registered, CONSTRUCTORS};
    pub use crate::types::Type;
    pub use crate::expr::{Expr, Alt, WILDCARD};
    pub use crate::decl::{Module, Definitions, Signatures, Ordered};
    pub use crate::scope::Scope;
    pub use crate::pretty::{self, PrettyConfig, print_type, print_shape};
    pub use crate::ser;
}
