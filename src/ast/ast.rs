use std::fmt::{Debug, Display};

use crate::Span;

use super::{
    expressions::{
        BooleanExpr, CallExpr, FnLiteralExpr, Identifier, IfExpr, InfixExpr, IntegerExpr,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Implemented by every node in the AST.
pub trait Node: Debug + Display {
    /// Literal text of the token the node was built from.
    fn token_literal(&self) -> &str;
    /// Returns the span of the node's originating token.
    fn get_span(&self) -> &Span;
}

/// Statement
///
/// Closed set of statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    fn inner(&self) -> &dyn Node {
        match self {
            Stmt::Let(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::Expression(stmt) => stmt,
            Stmt::Block(stmt) => stmt,
        }
    }
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        self.inner().token_literal()
    }
    fn get_span(&self) -> &Span {
        self.inner().get_span()
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.inner(), f)
    }
}

/// Expression
///
/// Closed set of expression kinds. Children are owned, so the tree never shares nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    FnLiteral(FnLiteralExpr),
    Call(CallExpr),
}

impl Expr {
    fn inner(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Integer(expr) => expr,
            Expr::Boolean(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::If(expr) => expr,
            Expr::FnLiteral(expr) => expr,
            Expr::Call(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        self.inner().token_literal()
    }
    fn get_span(&self) -> &Span {
        self.inner().get_span()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.inner(), f)
    }
}

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
