//! # Auric Parse
//!
//! Lexer and parser for Auric surface syntax: types, terms, and source
//! units of signatures and definitions.
//!
//! ## Example
//!
//! ```rust
//! use auric_parse::prelude::*;
//!
//! let module = parse_module("id : ∀a. a -> a\nid[a] x = x").unwrap();
//! assert_eq!(module.definitions.get("id").unwrap().to_string(), "Λa. λx. x");
//! ```

pub mod lexer;
pub mod parser;
pub mod module;
pub mod loader;

pub mod prelude {
    pub use crate::lexer::{Token, Lexer, Loc, Spanned};
    pub use crate::parser::{Parser, ParseError, ParseResult, parse_expr, parse_type};
    pub use crate::module::parse_module;
    pub use crate::loader::{Loader, LoadError, LoadResult, load_file, load_source, EXTENSION};
}
