//! Reference tokenizer
//!
//! Turns document source into the classified token stream the parser
//! consumes. Rules are tried in order at the current position; the first
//! match wins.

use lazy_static::lazy_static;
use regex::Regex;

use super::tokens::{Token, TokenKind, TokenStream};
use crate::utils::error::{ParseError, ParseResult};

lazy_static! {
    static ref COMMAND: Regex = Regex::new(r"^\\([a-zA-Z]+\*?)[ \t]*").unwrap();
    static ref ESCAPED_NEWLINE: Regex = Regex::new(r"^\\\n").unwrap();
    static ref SPECIAL_COMMAND: Regex = Regex::new(r"^\\(.)").unwrap();
    static ref COMMENT: Regex = Regex::new(r"^%([^\n]*)(\n[ \t]*)?").unwrap();
    static ref PARASEP: Regex = Regex::new(r"^(\n[ \t]*){2,}").unwrap();
    static ref NEWLINE: Regex = Regex::new(r"^\n[ \t]*").unwrap();
    static ref TEXT: Regex = Regex::new(r"^[^\\%{}\[\]~$&\n]+").unwrap();
}

/// Tokenizer over a complete document source
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(mut self) -> ParseResult<TokenStream> {
        while self.pos < self.input.len() {
            self.step()?;
        }
        Ok(TokenStream::new(self.tokens))
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn emit(&mut self, kind: TokenKind, value: impl Into<String>, raw: &str) {
        self.tokens.push(Token::new(self.line, kind, value, raw));
        self.pos += raw.len();
    }

    fn step(&mut self) -> ParseResult<()> {
        let rest = self.rest();

        if self.scan_verb(rest) {
            return Ok(());
        }
        if let Some(caps) = COMMAND.captures(rest) {
            let raw = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            self.emit(TokenKind::Command, name, raw);
            return Ok(());
        }
        if let Some(m) = ESCAPED_NEWLINE.find(rest) {
            self.emit(TokenKind::Text, m.as_str(), m.as_str());
            self.line += 1;
            return Ok(());
        }
        if let Some(caps) = SPECIAL_COMMAND.captures(rest) {
            let raw = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            self.emit(TokenKind::Command, name, raw);
            return Ok(());
        }
        if let Some(caps) = COMMENT.captures(rest) {
            let raw = caps.get(0).map_or("", |m| m.as_str());
            let body = caps.get(1).map_or("", |m| m.as_str());
            let newlines = raw.matches('\n').count();
            self.emit(TokenKind::Comment, body, raw);
            self.line += newlines;
            return Ok(());
        }
        if let Some(c) = rest.chars().next() {
            let kind = match c {
                '{' => Some(TokenKind::BGroup),
                '}' => Some(TokenKind::EGroup),
                '[' => Some(TokenKind::BOptional),
                ']' => Some(TokenKind::EOptional),
                '~' => Some(TokenKind::Tilde),
                '$' => Some(TokenKind::MathMode),
                '&' => Some(TokenKind::Ampersand),
                _ => None,
            };
            if let Some(kind) = kind {
                let raw = &rest[..c.len_utf8()];
                self.emit(kind, raw, raw);
                return Ok(());
            }
        }
        if let Some(m) = PARASEP.find(rest) {
            let lines = m.as_str().matches('\n').count();
            self.emit(TokenKind::ParaSep, "\n".repeat(lines), m.as_str());
            self.line += lines;
            return Ok(());
        }
        if let Some(m) = NEWLINE.find(rest) {
            self.emit(TokenKind::Text, " ", m.as_str());
            self.line += 1;
            return Ok(());
        }
        if let Some(m) = TEXT.find(rest) {
            self.emit(TokenKind::Text, m.as_str(), m.as_str());
            return Ok(());
        }

        let snippet: String = rest.chars().take(40).collect();
        Err(ParseError::Lex {
            snippet,
            line: self.line,
        })
    }

    /// `\verb<d>body<d>` becomes a `verb` command and three text tokens
    fn scan_verb(&mut self, rest: &str) -> bool {
        let Some(after) = rest.strip_prefix("\\verb") else {
            return false;
        };
        let Some(delim) = after.chars().next() else {
            return false;
        };
        if delim.is_ascii_alphabetic() || delim == '\n' {
            return false;
        }
        let body_start = delim.len_utf8();
        let Some(body_len) = after[body_start..].find(delim) else {
            return false;
        };
        let body = &after[body_start..body_start + body_len];
        if body.contains('\n') {
            return false;
        }
        let delim_str = &after[..body_start];

        self.emit(TokenKind::Command, "verb", "\\verb");
        self.emit(TokenKind::Text, delim_str, delim_str);
        self.emit(TokenKind::Text, body, body);
        self.emit(TokenKind::Text, delim_str, delim_str);
        true
    }
}

/// Tokenize a document source
pub fn tokenize(input: &str) -> ParseResult<TokenStream> {
    Lexer::new(input).tokenize()
}
