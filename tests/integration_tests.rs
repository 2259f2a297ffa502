//! Integration tests for the full front end.
//!
//! These tests drive the public API from source text through lexing and
//! parsing, checking both the resulting tree and the recorded diagnostics.

use indoc::indoc;
use monkey::{
    ast::ast::{Expr, Node, Stmt},
    lexer::{lexer::Lexer, tokens::TokenKind},
    parse,
    parser::parser::Parser,
    render_error,
};

#[test]
fn test_parse_complete_program() {
    let source = indoc! {"
        let five = 5;
        let ten = 10;

        let add = fn(x, y) {
            x + y;
        };

        let result = add(five, ten);
        let max = fn(a, b) { if (a > b) { return a; } else { return b; } };
        !-result;
        max(result, 10) == 15;
    "};

    let program = parse(source.to_string(), Some("program.mk".to_string())).unwrap();

    assert_eq!(program.len(), 7);
    assert_eq!(
        program.to_string(),
        "let five = 5;\
         let ten = 10;\
         let add = fn(x, y) (x + y);\
         let result = add(five, ten);\
         let max = fn(a, b) if(a > b) return a;else return b;;\
         (!(-result))\
         (max(result, 10) == 15)"
    );
}

#[test]
fn test_parse_reports_every_error() {
    let source = indoc! {"
        let x 5;
        let = 10;
        let y = 3;
        if (y) { y
    "};

    let errors = parse(source.to_string(), None).unwrap_err();
    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();

    assert_eq!(
        messages,
        vec![
            "expected next token to be ASSIGN, got INT instead",
            "expected next token to be IDENT, got ASSIGN instead",
            "expected next token to be RBRACE, got EOF instead",
        ]
    );
}

#[test]
fn test_empty_source_is_an_empty_program() {
    let program = parse(String::new(), None).unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_parser_from_lexer() {
    let lexer = Lexer::new("let f = fn() { 1 }; f();".to_string(), Some("repl".to_string()));
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.len(), 2);

    let Stmt::Let(let_stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(let_stmt.name.value, "f");
    assert!(matches!(let_stmt.value, Some(Expr::FnLiteral(_))));
    assert_eq!(let_stmt.get_span().start.1.as_str(), "repl");

    let Stmt::Expression(call) = &program.statements[1] else {
        panic!("expected expression statement");
    };
    assert_eq!(call.token_literal(), "f");
    assert_eq!(call.get_span().start.0, 20);
}

#[test]
fn test_lexer_feeds_parser_lazily() {
    let mut lexer = Lexer::new("1 + 2".to_string(), None);
    assert_eq!(lexer.next_token().kind, TokenKind::Number);

    // The parser picks up where the lexer was left.
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert_eq!(parser.errors(), vec!["no prefix parse function for PLUS found"]);
    assert_eq!(program.to_string(), "2");
}

#[test]
fn test_render_error_for_unterminated_block() {
    let source = "let f = fn(x) {\n  x";
    let errors = parse(source.to_string(), Some("f.mk".to_string())).unwrap_err();

    let rendered = render_error(source, &errors[0]);
    assert!(rendered.starts_with(
        "Error: expected next token to be RBRACE, got EOF instead (Block is never closed"
    ));
    assert!(rendered.contains("-> f.mk"));
    assert!(rendered.contains("2 | x"));
}
