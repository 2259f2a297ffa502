use std::fmt::Display;

use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expr, Node},
    statements::BlockStmt,
};

macro_rules! impl_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl Node for $node {
                fn token_literal(&self) -> &str {
                    &self.token.value
                }
                fn get_span(&self) -> &Span {
                    &self.token.span
                }
            }
        )*
    };
}

impl_node!(
    Identifier,
    IntegerExpr,
    BooleanExpr,
    PrefixExpr,
    InfixExpr,
    IfExpr,
    FnLiteralExpr,
    CallExpr,
);

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

// LITERALS

/// Identifier
/// A bound name. Also used for `let` targets and function parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

// COMPLEX

/// Prefix Expression
/// `-x` or `!x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// A binary operation such as `a + b` or `x == y`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if{} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, "else {}", alternative)?;
        }
        Ok(())
    }
}

/// Function Literal
/// `fn(<parameters>) { <body> }`
#[derive(Debug, Clone, PartialEq)]
pub struct FnLiteralExpr {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStmt,
}

impl Display for FnLiteralExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) {}",
            self.token_literal(),
            join(&self.parameters),
            self.body
        )
    }
}

/// Call Expression
/// `callee(<arguments>)`; the token is the opening `(`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.callee, join(&self.arguments))
    }
}
