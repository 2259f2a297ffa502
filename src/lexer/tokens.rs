use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };
}

/// Resolves an identifier-shaped word to its reserved kind, or `Identifier`.
pub fn lookup_identifier(word: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(word)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,

    Identifier,
    Number,

    Assignment, // =
    Plus,
    Dash,
    Not, // !
    Star,
    Slash,

    Less,
    Greater,
    Equals,    // ==
    NotEquals, // !=

    Comma,
    Semicolon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    // Reserved
    Fn,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Stable upper-case name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Identifier => "IDENT",
            TokenKind::Number => "INT",
            TokenKind::Assignment => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Dash => "MINUS",
            TokenKind::Not => "BANG",
            TokenKind::Star => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Less => "LT",
            TokenKind::Greater => "GT",
            TokenKind::Equals => "EQ",
            TokenKind::NotEquals => "NOT_EQ",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenCurly => "LBRACE",
            TokenKind::CloseCurly => "RBRACE",
            TokenKind::Fn => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
