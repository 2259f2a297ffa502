use std::{fmt::Display, slice::Iter};

use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expr, Node, Stmt},
    expressions::Identifier,
};

/// Writes an optional child, printing nothing for an absent one.
fn write_optional(f: &mut std::fmt::Formatter<'_>, expr: &Option<Expr>) -> std::fmt::Result {
    match expr {
        Some(expr) => write!(f, "{}", expr),
        None => Ok(()),
    }
}

/// `let <name> = <value>;`
///
/// `value` is `None` when the right-hand side failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub token: Token,
    pub name: Identifier,
    pub value: Option<Expr>,
}

impl Node for LetStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
    fn get_span(&self) -> &Span {
        &self.token.span
    }
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = ", self.token_literal(), self.name)?;
        write_optional(f, &self.value)?;
        write!(f, ";")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<Expr>,
}

impl Node for ReturnStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
    fn get_span(&self) -> &Span {
        &self.token.span
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.token_literal())?;
        write_optional(f, &self.value)?;
        write!(f, ";")
    }
}

/// An expression on its own, with an optional trailing `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Option<Expr>,
}

impl Node for ExpressionStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
    fn get_span(&self) -> &Span {
        &self.token.span
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_optional(f, &self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn len(&self) -> usize {
        self.body.len()
    }
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Node for BlockStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
    fn get_span(&self) -> &Span {
        &self.token.span
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.body {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
