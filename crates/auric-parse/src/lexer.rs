//! Lexer for Auric
//!
//! Tokenizes Auric source using logos. Newlines are significant (they end
//! case alternatives); other whitespace is skipped. Characters no rule
//! recognizes become `Token::Unknown` and are only an error if the parser
//! meets one outside a refinement predicate.

use logos::{Logos, Span};
use std::fmt;

/// Source location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub start: usize,
    pub end: usize,
}

impl Loc {
    pub fn from_span(span: Span) -> Self {
        Loc { start: span.start, end: span.end }
    }
}

/// Token with location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub loc: Loc,
}

impl<T> Spanned<T> {
    pub fn new(value: T, loc: Loc) -> Self {
        Spanned { value, loc }
    }
}

/// Token type
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // ============ Keywords ============
    #[token("case")]
    Case,
    #[token("of")]
    Of,

    // ============ Delimiters ============
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("\n")]
    Newline,

    // ============ Types ============
    #[token("->")]
    #[token("→")]
    Arrow,
    #[token("∀")]
    #[token("forall")]
    Forall,
    #[token("Λ")]
    TyLambda,
    #[token("\\")]
    Backslash,
    #[token("∪")]
    #[token("\\/")]
    Union,
    #[token("∩")]
    #[token("/\\")]
    Inter,

    // ============ Identifiers and literals ============
    /// Upper-case-leading: type names
    #[regex(r"[A-Z][A-Za-z0-9_']*", |lex| lex.slice().to_string())]
    TypeIdent(String),

    /// Lower-case-leading (or underscore): terms, binders, type variables, tags
    #[regex(r"[a-z_][A-Za-z0-9_']*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Digits only appear inside refinement predicates
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Any character no other rule matched
    Unknown(char),
}

impl Token {
    /// Can this token start a term atom?
    pub fn can_start_term(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::LParen | Token::Case | Token::TyLambda)
    }

    /// Can this token start a type atom (for juxtaposed application)?
    pub fn can_start_type_atom(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::TypeIdent(_) | Token::LParen | Token::LBrace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Case => write!(f, "case"),
            Token::Of => write!(f, "of"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Eq => write!(f, "="),
            Token::Dot => write!(f, "."),
            Token::Newline => write!(f, "newline"),
            Token::Arrow => write!(f, "->"),
            Token::Forall => write!(f, "∀"),
            Token::TyLambda => write!(f, "Λ"),
            Token::Backslash => write!(f, "\\"),
            Token::Union => write!(f, "∪"),
            Token::Inter => write!(f, "∩"),
            Token::TypeIdent(s) | Token::Ident(s) | Token::Number(s) => write!(f, "{}", s),
            Token::Unknown(c) => write!(f, "{}", c),
        }
    }
}

/// Spanned token stream over a source string
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { inner: Token::lexer(source) }
    }

    /// Lex the whole input
    pub fn tokenize(source: &str) -> Vec<Spanned<Token>> {
        Lexer::new(source).collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let loc = Loc::from_span(self.inner.span());
        let token = match result {
            Ok(token) => token,
            Err(()) => Token::Unknown(self.inner.slice().chars().next().unwrap_or('\u{FFFD}')),
        };
        Some(Spanned::new(token, loc))
    }
}
