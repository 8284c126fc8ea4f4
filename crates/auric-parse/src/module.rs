//! Top-level source units
//!
//! A unit is a sequence of lines. A line with `:` and no `=` is a signature
//! `name : Type`. A line with `=` at column zero starts a definition; every
//! following line that begins with whitespace continues its right-hand side.
//! Blank lines are ignored.
//!
//! Definitions are elaborated while they are read: `f[a, b] x y = e`
//! becomes `f = Λa. Λb. λx. λy. e`.

use crate::lexer::{Lexer, Spanned, Token};
use crate::parser::{self, ParseError, ParseResult};
use auric_ast::decl::Module;
use auric_ast::expr::Expr;
use auric_ast::types::Type;
use tracing::{debug, trace};

/// Left-hand side of a definition: `name[generics] params`
#[derive(Debug, Clone, PartialEq)]
struct Head {
    name: String,
    generics: Vec<String>,
    params: Vec<String>,
}

/// Parse a source unit into signatures and elaborated definitions
pub fn parse_module(source: &str) -> ParseResult<Module> {
    let lines: Vec<&str> = source.lines().collect();
    let mut module = Module::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;
        i += 1;

        if line.trim().is_empty() {
            continue;
        }

        if line.contains(':') && !line.contains('=') {
            let (name, ty) = parse_signature(line).map_err(|e| e.at_line(line_no))?;
            trace!(name = %name, ty = %ty, "signature");
            module.signatures.insert(name, ty);
            continue;
        }

        if line.contains('=') && !starts_indented(line) {
            let (lhs, first) = line.split_once('=').unwrap_or((line, ""));
            let mut body = vec![first.trim()];
            while i < lines.len() && starts_indented(lines[i]) {
                body.push(lines[i].trim_start());
                i += 1;
            }

            let (name, expr) = parse_definition(lhs, &body.join("\n")).map_err(|e| e.at_line(line_no))?;
            debug!(name = %name, "definition");
            module.definitions.insert(name, expr);
            continue;
        }

        return Err(ParseError::InvalidLine {
            line: line_no,
            text: line.to_string(),
            message: "expected a signature `name : Type` or a definition `name = term`",
        });
    }

    Ok(module)
}

fn starts_indented(line: &str) -> bool {
    line.starts_with(|c: char| c == ' ' || c == '\t')
}

fn parse_signature(line: &str) -> ParseResult<(String, Type)> {
    let (name, ty) = line.split_once(':').unwrap_or((line, ""));
    let name = single_ident(name.trim())?;
    let ty = parser::parse_type(ty)?;
    Ok((name, ty))
}

/// A signature name must be exactly one lower-case identifier
fn single_ident(text: &str) -> ParseResult<String> {
    let tokens: Vec<Token> = Lexer::tokenize(text).into_iter().map(|t| t.value).collect();
    match tokens.as_slice() {
        [Token::Ident(name)] => Ok(name.clone()),
        [Token::TypeIdent(name)] => Err(ParseError::InvalidIdent {
            name: name.clone(),
            reason: "definition names must start with a lower-case letter",
        }),
        _ => Err(ParseError::InvalidIdent {
            name: text.to_string(),
            reason: "expected a single identifier",
        }),
    }
}

fn parse_definition(lhs: &str, rhs: &str) -> ParseResult<(String, Expr)> {
    let head = parse_head(lhs)?;

    let rhs = rhs.trim();
    if rhs.is_empty() {
        return Err(ParseError::UnexpectedEof { expected: "definition body".into() });
    }
    let body = parser::parse_expr(rhs)?;

    // Parameters innermost, first one outermost; generics wrap the lot
    let body = head.params.iter().rev().fold(body, |acc, p| Expr::lam(p.as_str(), acc));
    let body = head.generics.iter().rev().fold(body, |acc, g| Expr::ty_abs(g.as_str(), acc));
    Ok((head.name, body))
}

fn parse_head(lhs: &str) -> ParseResult<Head> {
    let mut tokens = Lexer::tokenize(lhs).into_iter().peekable();

    let name = match tokens.next() {
        Some(Spanned { value: Token::Ident(name), .. }) => name,
        Some(other) => return Err(invalid_head(other)),
        None => return Err(ParseError::UnexpectedEof { expected: "definition name".into() }),
    };

    let mut generics = Vec::new();
    if tokens.peek().map(|t| &t.value) == Some(&Token::LBracket) {
        tokens.next();
        loop {
            match tokens.next() {
                Some(Spanned { value: Token::Ident(g), .. }) => generics.push(g),
                Some(other) => return Err(invalid_head(other)),
                None => return Err(ParseError::UnexpectedEof { expected: "type parameter".into() }),
            }
            match tokens.next() {
                Some(Spanned { value: Token::Comma, .. }) => continue,
                Some(Spanned { value: Token::RBracket, .. }) => break,
                Some(other) => return Err(invalid_head(other)),
                None => return Err(ParseError::UnexpectedEof { expected: "']'".into() }),
            }
        }
    }

    let mut params = Vec::new();
    for tok in tokens {
        match tok {
            Spanned { value: Token::Ident(p), .. } => params.push(p),
            other => return Err(invalid_head(other)),
        }
    }

    Ok(Head { name, generics, params })
}

/// Error for an unexpected token left of `=`; offsets are line columns
fn invalid_head(found: Spanned<Token>) -> ParseError {
    let offset = found.loc.start;
    match found.value {
        Token::TypeIdent(name) => ParseError::InvalidIdent {
            name,
            reason: "names on the left of `=` must start with a lower-case letter",
        },
        Token::Unknown(ch) => ParseError::Lexical { ch, offset },
        other => ParseError::Unexpected {
            found: other.to_string(),
            offset,
            expected: "identifier".into(),
        },
    }
}
