use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Byte-at-a-time scanner over a single source buffer.
///
/// Tokens are produced on demand by [`Lexer::next_token`]; there is no way to
/// rewind, so callers that need lookahead buffer tokens themselves.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    /// Offset of `ch` in `source`
    position: usize,
    /// Offset of the byte after `ch`
    read_position: usize,
    /// Byte under examination, 0 once input is exhausted
    ch: u8,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            position: 0,
            read_position: 0,
            ch: 0,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    fn read_char(&mut self) {
        if self.read_position >= self.source.len() {
            self.ch = 0;
            self.position = self.source.len();
            self.read_position = self.source.len();
        } else {
            self.ch = self.source.as_bytes()[self.read_position];
            self.position = self.read_position;
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.source.len() {
            0
        } else {
            self.source.as_bytes()[self.read_position]
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.read_char();
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.at_eof() && matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        let literal = (self.ch as char).to_string();
        self.read_char();
        MK_TOKEN!(kind, literal, MK_SPAN!(start, self.position, self.file))
    }

    /// Emits `double` when the next byte is `=`, otherwise `single`.
    fn with_equals(&mut self, single: TokenKind, double: TokenKind) -> Token {
        if self.peek_char() != b'=' {
            return self.single(single);
        }

        let start = self.position;
        self.advance_n(2);
        MK_TOKEN!(
            double,
            self.source[start..self.position].to_string(),
            MK_SPAN!(start, self.position, self.file)
        )
    }

    /// Consumes the maximal run matched by `pattern` starting at the current byte.
    ///
    /// Only called when the current byte is ASCII, so `position` is a char boundary.
    fn read_run(&mut self, pattern: &Regex) -> (usize, String) {
        let start = self.position;
        let length = pattern
            .find(&self.source[start..])
            .map(|matched| matched.end())
            .unwrap_or(1);
        self.advance_n(length);
        (start, self.source[start..self.position].to_string())
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.at_eof() {
            return MK_TOKEN!(
                TokenKind::EOF,
                String::new(),
                MK_SPAN!(self.position, self.position, self.file)
            );
        }

        let token = match self.ch {
            b'=' => self.with_equals(TokenKind::Assignment, TokenKind::Equals),
            b'!' => self.with_equals(TokenKind::Not, TokenKind::NotEquals),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Dash),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'<' => self.single(TokenKind::Less),
            b'>' => self.single(TokenKind::Greater),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::OpenParen),
            b')' => self.single(TokenKind::CloseParen),
            b'{' => self.single(TokenKind::OpenCurly),
            b'}' => self.single(TokenKind::CloseCurly),
            ch if is_letter(ch) => {
                let (start, word) = self.read_run(&IDENTIFIER_PATTERN);
                MK_TOKEN!(
                    lookup_identifier(&word),
                    word,
                    MK_SPAN!(start, self.position, self.file)
                )
            }
            ch if ch.is_ascii_digit() => {
                let (start, digits) = self.read_run(&INTEGER_PATTERN);
                MK_TOKEN!(
                    TokenKind::Integer,
                    digits,
                    MK_SPAN!(start, self.position, self.file)
                )
            }
            _ => self.single(TokenKind::Illegal),
        };

        trace!("lexed {} {:?}", token.kind, token.literal);
        token
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Lexes the whole source, returning every token up to and including the first EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
