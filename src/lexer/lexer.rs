use std::rc::Rc;

use crate::{Position, Span, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Pull-based scanner over a source buffer.
///
/// `ch` is the byte under the cursor and `read_pos` the next byte to read.
/// A `ch` of 0 marks end of input and is never emitted as literal text.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: Vec<u8>,
    pos: usize,
    read_pos: usize,
    ch: u8,
    file: Rc<String>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source: source.into_bytes(),
            pos: 0,
            read_pos: 0,
            ch: 0,
            file: file_name,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    fn read_char(&mut self) {
        self.ch = self.source.get(self.read_pos).copied().unwrap_or(0);
        self.pos = self.read_pos;
        if self.read_pos <= self.source.len() {
            self.read_pos += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        self.source.get(self.read_pos).copied().unwrap_or(0)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    fn span(&self, start: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(self.pos),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_while(&mut self, accept: fn(u8) -> bool) -> String {
        let start = self.pos;
        while !self.at_eof() && accept(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.source[start..self.pos]).into_owned()
    }

    /// Emits a token spanning `len` bytes from the cursor and steps past them.
    fn single(&mut self, kind: TokenKind, len: usize) -> Token {
        let start = self.pos;
        let value = String::from_utf8_lossy(&self.source[start..start + len]).into_owned();
        for _ in 0..len {
            self.read_char();
        }
        MK_TOKEN!(kind, value, self.span(start))
    }

    /// Scans and returns the next token. Keeps returning EOF once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::new(), self.span(start));
        }

        match self.ch {
            b'=' if self.peek_char() == b'=' => self.single(TokenKind::Equals, 2),
            b'=' => self.single(TokenKind::Assignment, 1),
            b'!' if self.peek_char() == b'=' => self.single(TokenKind::NotEquals, 2),
            b'!' => self.single(TokenKind::Not, 1),
            b'+' => self.single(TokenKind::Plus, 1),
            b'-' => self.single(TokenKind::Dash, 1),
            b'*' => self.single(TokenKind::Star, 1),
            b'/' => self.single(TokenKind::Slash, 1),
            b'<' => self.single(TokenKind::Less, 1),
            b'>' => self.single(TokenKind::Greater, 1),
            b',' => self.single(TokenKind::Comma, 1),
            b';' => self.single(TokenKind::Semicolon, 1),
            b'(' => self.single(TokenKind::OpenParen, 1),
            b')' => self.single(TokenKind::CloseParen, 1),
            b'{' => self.single(TokenKind::OpenCurly, 1),
            b'}' => self.single(TokenKind::CloseCurly, 1),
            ch if is_letter(ch) => {
                let word = self.read_while(is_letter);
                MK_TOKEN!(lookup_identifier(&word), word, self.span(start))
            }
            ch if ch.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                MK_TOKEN!(TokenKind::Number, digits, self.span(start))
            }
            ch => {
                let len = utf8_len(ch).min(self.source.len() - self.pos);
                self.single(TokenKind::Illegal, len)
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the first EOF.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is(TokenKind::EOF) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Byte length of the UTF-8 sequence starting with `lead`.
fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Scans the whole source, returning every token including the trailing EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}
