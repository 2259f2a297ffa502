use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
    parser::{
        expr::{current_identifier, parse_expr},
        lookups::BindingPower,
    },
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// Returns `None` when the statement was abandoned because a required token
/// was missing anywhere inside it; the error is already recorded.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let stmt = match parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        Some(handler) => handler(parser),
        None => parse_expression_stmt(parser),
    };

    if parser.take_abandoned() {
        return None;
    }

    stmt
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }
    let name = current_identifier(parser);

    if !parser.expect_peek(TokenKind::Assignment) {
        return None;
    }
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses `{ ... }` starting on the `{` and leaves the parser on the `}`.
///
/// Reaching end of input before `}` records an error and yields `None`.
pub fn parse_block_stmt(parser: &mut Parser) -> Option<BlockStmt> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut body = Vec::new();
    while !parser.current_token_is(TokenKind::CloseCurly)
        && !parser.current_token_is(TokenKind::EOF)
    {
        let depth = parser.brace_depth();
        match parse_stmt(parser) {
            Some(stmt) => body.push(stmt),
            None => parser.synchronize(depth),
        }
        parser.advance();
    }

    if parser.current_token_is(TokenKind::EOF) {
        parser.current_error(TokenKind::CloseCurly);
        return None;
    }

    Some(BlockStmt { token, body })
}
