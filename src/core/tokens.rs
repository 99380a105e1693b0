//! Token stream consumed by the parser
//!
//! The stream is fully materialized before parsing starts. Lookahead is a
//! cursor into the buffer plus a pushback stack, so any token that was popped
//! (or a modified copy of it, e.g. a text token with its first character split
//! off) can be restored exactly.

use std::fmt;

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    Command,
    Text,
    BGroup,
    EGroup,
    Comment,
    Tilde,
    Ampersand,
    MathMode,
    BOptional,
    EOptional,
    ParaSep,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Command => "command",
            TokenKind::Text => "text",
            TokenKind::BGroup => "bgroup",
            TokenKind::EGroup => "egroup",
            TokenKind::Comment => "comment",
            TokenKind::Tilde => "tilde",
            TokenKind::Ampersand => "ampersand",
            TokenKind::MathMode => "mathmode",
            TokenKind::BOptional => "boptional",
            TokenKind::EOptional => "eoptional",
            TokenKind::ParaSep => "parasep",
        };
        f.write_str(name)
    }
}

/// A single token: `(line, kind, value, raw)`
///
/// `value` may be normalized (a command name without its backslash, a newline
/// folded to a space); `raw` is always the literal source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: usize,
    pub kind: TokenKind,
    pub value: String,
    pub raw: String,
}

impl Token {
    pub fn new(line: usize, kind: TokenKind, value: impl Into<String>, raw: impl Into<String>) -> Self {
        Token {
            line,
            kind,
            value: value.into(),
            raw: raw.into(),
        }
    }

    /// Command token, raw text is `\name`
    pub fn command(line: usize, name: &str) -> Self {
        Token::new(line, TokenKind::Command, name, format!("\\{}", name))
    }

    /// Text token whose value and raw text are identical
    pub fn text(line: usize, text: &str) -> Self {
        Token::new(line, TokenKind::Text, text, text)
    }

    pub fn is_command(&self, name: &str) -> bool {
        self.kind == TokenKind::Command && self.value == name
    }

    /// Whitespace-only text, skipped while seeking arguments
    pub fn is_blank_text(&self) -> bool {
        self.kind == TokenKind::Text && self.value.trim().is_empty()
    }

    /// Split off the first character of a text token.
    ///
    /// Returns the character and the remaining token, if anything remains.
    pub fn split_first_char(&self) -> Option<(char, Option<Token>)> {
        let mut chars = self.value.chars();
        let first = chars.next()?;
        let rest_value = chars.as_str();
        if rest_value.is_empty() {
            return Some((first, None));
        }
        let rest_raw = self
            .raw
            .strip_prefix(first)
            .unwrap_or(self.raw.as_str())
            .to_string();
        Some((
            first,
            Some(Token::new(self.line, self.kind, rest_value, rest_raw)),
        ))
    }
}

/// Buffered token stream with exact pushback
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    pushed: Vec<Token>,
    line: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            pos: 0,
            pushed: Vec::new(),
            line: 0,
        }
    }

    /// Line of the most recently popped token
    pub fn line(&self) -> usize {
        self.line
    }

    /// Line of the next token, falling back to the last seen line
    pub fn next_line(&self) -> usize {
        self.peek().map(|t| t.line).unwrap_or(self.line)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pushed.is_empty() && self.pos >= self.tokens.len()
    }

    /// Advance and return the next token
    pub fn pop(&mut self) -> Option<Token> {
        let tok = match self.pushed.pop() {
            Some(tok) => tok,
            None => {
                let tok = self.tokens.get(self.pos)?.clone();
                self.pos += 1;
                tok
            }
        };
        self.line = tok.line;
        Some(tok)
    }

    /// Pop up to `n` tokens
    pub fn pop_many(&mut self, n: usize) -> Vec<Token> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            match self.pop() {
                Some(tok) => out.push(tok),
                None => break,
            }
        }
        out
    }

    pub fn peek(&self) -> Option<&Token> {
        self.pushed.last().or_else(|| self.tokens.get(self.pos))
    }

    /// Look at up to `n` upcoming tokens without consuming them
    pub fn peek_many(&self, n: usize) -> Vec<&Token> {
        self.pushed
            .iter()
            .rev()
            .chain(self.tokens[self.pos.min(self.tokens.len())..].iter())
            .take(n)
            .collect()
    }

    /// Push a token back; it is the next one returned by `pop`
    pub fn push(&mut self, tok: Token) {
        self.pushed.push(tok);
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.pop()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}
