use log::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FnLiteralExpr, Identifier, IfExpr, InfixExpr, IntegerExpr,
            PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// Starts on the expression's first token and leaves the parser on its last.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    let token_kind = parser.current_token_kind();
    trace!("parse_expr {} at {:?}", token_kind, bp);

    // First parse NUD
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let error = Error::new(
            ErrorImpl::NoPrefixParseFn { token: token_kind },
            parser.get_position(),
        );
        parser.push_error(error);
        return None;
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Some(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(current_identifier(parser)))
}

pub(crate) fn current_identifier(parser: &Parser) -> Identifier {
    let token = parser.current_token().clone();
    Identifier {
        value: token.value.clone(),
        token,
    }
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => {
            let error = Error::new(
                ErrorImpl::IntegerParseError {
                    literal: token.value.clone(),
                },
                token.span.start.clone(),
            );
            parser.push_error(error);
            None
        }
    }
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Boolean(BooleanExpr {
        value: parser.current_token_is(TokenKind::True),
        token: parser.current_token().clone(),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default);

    if parser.is_abandoned() || !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    expr
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default);

    if parser.is_abandoned()
        || !parser.expect_peek(TokenKind::CloseParen)
        || !parser.expect_peek(TokenKind::OpenCurly)
    {
        return None;
    }
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.advance();
        if !parser.expect_peek(TokenKind::OpenCurly) {
            return None;
        }
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition?),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_literal_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }
    let parameters = parse_fn_parameters(parser)?;

    if !parser.expect_peek(TokenKind::OpenCurly) {
        return None;
    }
    let body = parse_block_stmt(parser)?;

    Some(Expr::FnLiteral(FnLiteralExpr {
        token,
        parameters,
        body,
    }))
}

/// Parses `a, b, c)` after the opening `(`; leaves the parser on the `)`.
fn parse_fn_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(parameters);
    }

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }
    parameters.push(current_identifier(parser));

    while parser.peek_token_is(TokenKind::Comma) {
        parser.advance();
        if !parser.expect_peek(TokenKind::Identifier) {
            return None;
        }
        parameters.push(current_identifier(parser));
    }

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    Some(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Some(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

/// Parses `x, f(y), 1 + 2)` after the opening `(`; leaves the parser on the `)`.
///
/// Every argument is attempted even after one fails so all errors are reported,
/// unless a missing token inside an argument has abandoned the statement.
fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Expr>> {
    let mut arguments = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(vec![]);
    }

    parser.advance();
    arguments.push(parse_expr(parser, BindingPower::Default));

    while !parser.is_abandoned() && parser.peek_token_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default));
    }

    if parser.is_abandoned() {
        return None;
    }

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    arguments.into_iter().collect()
}
