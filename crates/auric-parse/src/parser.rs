//! Parser for Auric
//!
//! Recursive descent for both grammars over one token buffer:
//! - types: quantifier, right-associative arrow, precedence-climbing shape
//!   lattice (∪ looser than ∩, `\ tag` tightest), juxtaposed application,
//!   braces for refinements
//! - terms: juxtaposed application, `f[T]` type application, `Λa. e`,
//!   `case e of` with one alternative per line

use crate::lexer::{Lexer, Spanned, Token};
use auric_ast::expr::{Alt, Expr};
use auric_ast::shape::Shape;
use auric_ast::types::Type;
use thiserror::Error;

/// Parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token '{found}' at offset {offset}, expected {expected}")]
    Unexpected { found: String, offset: usize, expected: String },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Unrecognized character '{ch}' at offset {offset}")]
    Lexical { ch: char, offset: usize },

    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdent { name: String, reason: &'static str },

    #[error("Operator {op} needs shape operands, found {found}")]
    NotAShape { op: &'static str, found: String },

    #[error("Line {line}: {message}: {text}")]
    InvalidLine { line: usize, text: String, message: &'static str },

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        ParseError::AtLine { line, source: Box::new(self) }
    }
}

/// Parser
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    /// Nesting of case alternative bodies; inside one a newline ends the term
    alt_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            source,
            tokens: Lexer::tokenize(source),
            pos: 0,
            alt_depth: 0,
        }
    }

    // ============ Utilities ============

    fn peek(&self) -> Option<&Token> {
        self.peek_at(self.pos)
    }

    fn peek_at(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos).map(|t| &t.value)
    }

    fn next(&mut self) -> Option<Spanned<Token>> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Error for the token at the cursor (or end of input)
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(Spanned { value: Token::Unknown(ch), loc }) => ParseError::Lexical { ch: *ch, offset: loc.start },
            Some(tok) => ParseError::Unexpected {
                found: tok.value.to_string(),
                offset: tok.loc.start,
                expected: expected.into(),
            },
            None => ParseError::UnexpectedEof { expected: expected.into() },
        }
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    /// Lower-case identifier (term variable, binder, type variable or tag)
    fn expect_lower(&mut self, what: &str) -> ParseResult<String> {
        match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(name)
            }
            Some(Token::TypeIdent(name)) => Err(ParseError::InvalidIdent {
                name,
                reason: "expected a lower-case identifier here",
            }),
            _ => Err(self.unexpected(what)),
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(&Token::Newline) {}
    }

    /// Position of the first non-newline token at or after `pos`
    fn after_newlines(&self, mut pos: usize) -> usize {
        while self.peek_at(pos) == Some(&Token::Newline) {
            pos += 1;
        }
        pos
    }

    /// Require that only newlines remain
    pub fn expect_end(&mut self) -> ParseResult<()> {
        self.skip_newlines();
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input")),
        }
    }

    // ============ Type Parsing ============

    /// Parse a type
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        if self.eat(&Token::Forall) {
            let tv = self.expect_lower("type variable")?;
            self.expect(Token::Dot)?;
            let body = self.parse_type()?;
            return Ok(Type::forall(tv, body));
        }

        let lhs = self.parse_lattice(1)?;

        // Function type, right-associative
        if self.eat(&Token::Arrow) {
            let ret = self.parse_type()?;
            return Ok(Type::arrow(lhs, ret));
        }

        Ok(lhs)
    }

    /// Precedence climbing over ∪ (1) and ∩ (2)
    fn parse_lattice(&mut self, min_prec: u8) -> ParseResult<Type> {
        let mut lhs = self.parse_difference()?;

        while let Some(prec) = self.peek().and_then(lattice_precedence) {
            if prec < min_prec {
                break;
            }
            let op = self.next().map(|t| t.value);
            let rhs = self.parse_lattice(prec + 1)?;
            lhs = match op {
                Some(Token::Union) => Type::shape(Shape::union(as_shape(lhs, "∪")?, as_shape(rhs, "∪")?)),
                _ => Type::shape(Shape::inter(as_shape(lhs, "∩")?, as_shape(rhs, "∩")?)),
            };
        }

        Ok(lhs)
    }

    /// Application operand followed by any number of `\ tag`
    fn parse_difference(&mut self) -> ParseResult<Type> {
        let mut ty = self.parse_type_app()?;
        while self.eat(&Token::Backslash) {
            let tag = self.expect_lower("constructor tag")?;
            ty = Type::shape(Shape::diff(as_shape(ty, "\\")?, tag));
        }
        Ok(ty)
    }

    /// Juxtaposed type application, left-associative
    fn parse_type_app(&mut self) -> ParseResult<Type> {
        let mut ty = self.parse_type_atom()?;
        while self.peek().map(Token::can_start_type_atom).unwrap_or(false) {
            let arg = self.parse_type_atom()?;
            ty = Type::app(ty, arg);
        }
        Ok(ty)
    }

    fn parse_type_atom(&mut self) -> ParseResult<Type> {
        match self.peek().cloned() {
            Some(Token::TypeIdent(name)) => {
                self.pos += 1;
                Ok(Type::shape(named_shape(name)))
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(Type::var(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let ty = self.parse_type()?;
                self.expect(Token::RParen)?;
                Ok(ty)
            }
            Some(Token::LBrace) => {
                self.pos += 1;
                self.parse_refinement()
            }
            _ => Err(self.unexpected("type")),
        }
    }

    /// `{ shapeExpr predicateTokens }`, after the opening brace
    fn parse_refinement(&mut self) -> ParseResult<Type> {
        let shape = self.parse_shape_expr(1)?;

        let mut words = Vec::new();
        let mut depth = 0usize;
        loop {
            let Some(tok) = self.next() else {
                return Err(ParseError::UnexpectedEof { expected: "'}'".into() });
            };
            match tok.value {
                Token::RBrace if depth == 0 => break,
                Token::RBrace => depth -= 1,
                Token::LBrace => depth += 1,
                Token::Newline => continue,
                _ => {}
            }
            words.push(&self.source[tok.loc.start..tok.loc.end]);
        }

        let pred = if words.is_empty() { "true".to_string() } else { words.join(" ") };
        Ok(Type::refined(shape, pred))
    }

    fn parse_shape_expr(&mut self, min_prec: u8) -> ParseResult<Shape> {
        let mut lhs = self.parse_shape_difference()?;
        while let Some(prec) = self.peek().and_then(lattice_precedence) {
            if prec < min_prec {
                break;
            }
            let op = self.next().map(|t| t.value);
            let rhs = self.parse_shape_expr(prec + 1)?;
            lhs = match op {
                Some(Token::Union) => Shape::union(lhs, rhs),
                _ => Shape::inter(lhs, rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_shape_difference(&mut self) -> ParseResult<Shape> {
        let mut shape = self.parse_shape_atom()?;
        while self.eat(&Token::Backslash) {
            let tag = self.expect_lower("constructor tag")?;
            shape = Shape::diff(shape, tag);
        }
        Ok(shape)
    }

    fn parse_shape_atom(&mut self) -> ParseResult<Shape> {
        match self.peek().cloned() {
            Some(Token::TypeIdent(name)) => {
                self.pos += 1;
                Ok(named_shape(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let shape = self.parse_shape_expr(1)?;
                self.expect(Token::RParen)?;
                Ok(shape)
            }
            Some(Token::Ident(name)) => Err(ParseError::InvalidIdent {
                name,
                reason: "shape names must start with an upper-case letter",
            }),
            _ => Err(self.unexpected("shape")),
        }
    }

    // ============ Term Parsing ============

    /// Parse a term: atoms applied by juxtaposition, left-associative
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_postfix()?;
        loop {
            match self.peek() {
                Some(t) if t.can_start_term() => {
                    let arg = self.parse_postfix()?;
                    lhs = Expr::app(lhs, arg);
                }
                // Reported as a casing error by parse_atom
                Some(Token::TypeIdent(_)) => {
                    self.parse_atom()?;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    /// Atom followed by any number of `[Type]` suffixes
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_atom()?;
        while self.eat(&Token::LBracket) {
            let ty = self.parse_type()?;
            self.expect(Token::RBracket)?;
            expr = Expr::ty_app(expr, ty);
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(Expr::var(name))
            }
            Some(Token::TypeIdent(name)) => Err(ParseError::InvalidIdent {
                name,
                reason: "term identifiers must start with a lower-case letter",
            }),
            Some(Token::LParen) => {
                self.pos += 1;
                // Parentheses lift the single-line restriction of alternative bodies
                let saved = std::mem::replace(&mut self.alt_depth, 0);
                self.skip_newlines();
                let inner = self.parse_expr();
                self.alt_depth = saved;
                let inner = inner?;
                self.skip_newlines();
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Case) => {
                self.pos += 1;
                self.parse_case()
            }
            Some(Token::TyLambda) => {
                self.pos += 1;
                let tv = self.expect_lower("type variable")?;
                self.expect(Token::Dot)?;
                let body = self.parse_expr()?;
                Ok(Expr::ty_abs(tv, body))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `case scrutinee of` followed by one alternative per line
    fn parse_case(&mut self) -> ParseResult<Expr> {
        let scrutinee = self.parse_expr()?;
        self.skip_newlines();
        self.expect(Token::Of)?;

        let mut alts: Vec<Alt> = Vec::new();
        loop {
            // Inside another alternative's body the rest of the line is all we get
            let start = if self.alt_depth == 0 { self.after_newlines(self.pos) } else { self.pos };
            if !self.is_alternative_at(start) {
                break;
            }
            self.pos = start;
            let alt = self.parse_alt()?;
            match alts.iter_mut().find(|a| a.tag == alt.tag) {
                Some(existing) => *existing = alt,
                None => alts.push(alt),
            }
            if self.alt_depth > 0 {
                break;
            }
        }

        if alts.is_empty() {
            return Err(self.unexpected("case alternative"));
        }
        Ok(Expr::case(scrutinee, alts))
    }

    /// Does `tag binder* ->` start at `pos`?
    fn is_alternative_at(&self, mut pos: usize) -> bool {
        if !matches!(self.peek_at(pos), Some(Token::Ident(_)) | Some(Token::TypeIdent(_))) {
            return false;
        }
        pos += 1;
        while matches!(self.peek_at(pos), Some(Token::Ident(_))) {
            pos += 1;
        }
        self.peek_at(pos) == Some(&Token::Arrow)
    }

    fn parse_alt(&mut self) -> ParseResult<Alt> {
        let tag = self.expect_lower("constructor tag")?;
        let mut binders = Vec::new();
        while let Some(Token::Ident(name)) = self.peek().cloned() {
            self.pos += 1;
            binders.push(name);
        }
        self.expect(Token::Arrow)?;

        self.alt_depth += 1;
        let body = self.parse_expr();
        self.alt_depth -= 1;
        let body = body?;

        match self.peek() {
            None | Some(Token::Newline) | Some(Token::RParen) => Ok(Alt::new(tag, binders, body)),
            Some(_) => Err(self.unexpected("end of line after case alternative")),
        }
    }
}

fn lattice_precedence(token: &Token) -> Option<u8> {
    match token {
        Token::Union => Some(1),
        Token::Inter => Some(2),
        _ => None,
    }
}

/// `Top` and `Bot` are the lattice extremes; any other name is a base shape
fn named_shape(name: String) -> Shape {
    match name.as_str() {
        "Top" => Shape::Top,
        "Bot" => Shape::Bot,
        _ => Shape::base(name),
    }
}

fn as_shape(ty: Type, op: &'static str) -> ParseResult<Shape> {
    match ty {
        Type::Shape(shape) => Ok(shape),
        other => Err(ParseError::NotAShape { op, found: other.to_string() }),
    }
}

// ============ Convenience Functions ============

/// Parse a complete type from a string
pub fn parse_type(source: &str) -> ParseResult<Type> {
    let mut parser = Parser::new(source);
    let ty = parser.parse_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse a complete term from a string
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(source);
    parser.skip_newlines();
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}
