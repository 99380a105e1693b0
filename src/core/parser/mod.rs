//! Recursive-descent document parser
//!
//! `DocParser` owns the token stream and drives the main loop
//! (`parse_nodes`), routing each token by kind. Commands and environments are
//! looked up in the `ParserConfig` handler tables.
//!
//! # Module Structure
//!
//! - `args`: the `M`/`T`/`O`/`Q` argument-spec interpreter
//! - `special`: single-character commands and accents
//! - `commands`: handlers for individual commands (sectioning, metadata, ...)
//! - `environment`: verbatim, math, list, float and production-list handlers
//! - `table`: fixed-arity tables and free-form tabulars

mod args;
mod commands;
mod environment;
mod special;
pub mod table;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::core::config::ParserConfig;
use crate::core::tokens::{Token, TokenKind, TokenStream};
use crate::core::tree::{Node, NodeList, RootNode};
use crate::utils::diagnostics::{unrecognized_commands_report, Diagnostic};
use crate::utils::error::{ParseError, ParseResult};

/// Where a call to `parse_nodes` stops
#[derive(Debug, Clone, Copy)]
pub(crate) enum Until<'a> {
    /// End of input
    Eof,
    /// `]` at brace depth 0
    OptionalEnd,
    /// `\end{name}`
    EnvironmentEnd(&'a str),
    /// `\<marker>` or `\end{env}`
    ItemOrEnd { env: &'a str, marker: &'a str },
    /// `\\` or `\end{env}`
    RowOrEnd(&'a str),
}

/// Why a call to `parse_nodes` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    Eof,
    GroupEnd,
    OptionalEnd,
    EnvironmentEnd,
    Marker,
}

impl<'a> Until<'a> {
    fn check(&self, tok: &Token, bracelevel: usize) -> Option<Stop> {
        match *self {
            Until::Eof => None,
            Until::OptionalEnd => {
                (tok.kind == TokenKind::EOptional && bracelevel == 0).then_some(Stop::OptionalEnd)
            }
            Until::EnvironmentEnd(_) => tok.is_command("end").then_some(Stop::EnvironmentEnd),
            Until::ItemOrEnd { marker, .. } => {
                if tok.is_command("end") {
                    Some(Stop::EnvironmentEnd)
                } else {
                    tok.is_command(marker).then_some(Stop::Marker)
                }
            }
            Until::RowOrEnd(_) => {
                if tok.is_command("end") {
                    Some(Stop::EnvironmentEnd)
                } else {
                    tok.is_command("\\").then_some(Stop::Marker)
                }
            }
        }
    }

    fn environment(&self) -> Option<&'a str> {
        match *self {
            Until::EnvironmentEnd(env) | Until::ItemOrEnd { env, .. } | Until::RowOrEnd(env) => {
                Some(env)
            }
            Until::Eof | Until::OptionalEnd => None,
        }
    }

    fn describe(&self) -> String {
        match self.environment() {
            Some(env) => format!("in {} environment", env),
            None => "while looking for ]".to_string(),
        }
    }
}

/// Parser for one document unit
pub struct DocParser<'c> {
    tokens: TokenStream,
    source: String,
    config: &'c ParserConfig,
    unrecognized: IndexSet<String>,
    params: IndexMap<String, Node>,
}

impl<'c> DocParser<'c> {
    pub fn new(tokens: TokenStream, source: impl Into<String>, config: &'c ParserConfig) -> Self {
        DocParser {
            tokens,
            source: source.into(),
            config,
            unrecognized: IndexSet::new(),
            params: IndexMap::new(),
        }
    }

    /// Parse the whole stream and run the transform pass
    pub fn parse(&mut self) -> ParseResult<RootNode> {
        let (children, _) = self.parse_nodes(Until::Eof, false)?;
        let mut root = RootNode::new(self.source.clone(), children);
        root.params = std::mem::take(&mut self.params);
        root.transform();
        Ok(root)
    }

    /// Command names seen without a handler, in order of first appearance
    pub fn unrecognized(&self) -> &IndexSet<String> {
        &self.unrecognized
    }

    /// Aggregate report of unrecognized commands, at most one entry
    ///
    /// Only meaningful after a successful [`DocParser::parse`].
    pub fn finish(&self) -> Vec<Diagnostic> {
        unrecognized_commands_report(&self.unrecognized)
            .into_iter()
            .collect()
    }

    /// Parse until `until` fires and return the flattened result
    pub(crate) fn parse_until(&mut self, until: Until<'_>, end_at_brace: bool) -> ParseResult<Node> {
        let (nodes, _) = self.parse_nodes(until, end_at_brace)?;
        Ok(nodes.flatten())
    }

    /// Main loop
    ///
    /// The token that fires `until` is consumed; for an environment end the
    /// `{name}` group is consumed and checked as well.
    pub(crate) fn parse_nodes(
        &mut self,
        until: Until<'_>,
        end_at_brace: bool,
    ) -> ParseResult<(NodeList, Stop)> {
        let mut nodes = NodeList::new();
        let mut bracelevel = 0usize;
        let mut math: Option<String> = None;

        while let Some(tok) = self.tokens.pop() {
            if let Some(stop) = until.check(&tok, bracelevel) {
                if stop == Stop::EnvironmentEnd {
                    if let Some(env) = until.environment() {
                        if bracelevel != 0 {
                            return Err(ParseError::structural(
                                format!("unclosed group before \\end{{{}}}", env),
                                tok.line,
                            ));
                        }
                        self.finish_environment(env, tok.line)?;
                    }
                }
                return Ok((nodes, stop));
            }

            if let Some(buf) = math.as_mut() {
                if tok.kind == TokenKind::MathMode {
                    let formula = std::mem::take(buf);
                    math = None;
                    nodes.append(Node::inline("math", vec![Node::Text(formula)]));
                } else {
                    buf.push_str(&tok.raw);
                }
                continue;
            }

            match tok.kind {
                TokenKind::Command => {
                    let node = self.dispatch_command(&tok)?;
                    nodes.append(node);
                }
                TokenKind::BGroup => bracelevel += 1,
                TokenKind::EGroup => {
                    if bracelevel == 0 {
                        if end_at_brace {
                            return Ok((nodes, Stop::GroupEnd));
                        }
                        return Err(ParseError::structural("unbalanced closing brace", tok.line));
                    }
                    bracelevel -= 1;
                }
                TokenKind::Comment => nodes.append(Node::Comment(tok.value)),
                TokenKind::Tilde => nodes.append(Node::Nbsp),
                TokenKind::Ampersand => nodes.append(Node::Ampersand),
                TokenKind::MathMode => math = Some(String::new()),
                TokenKind::ParaSep => nodes.append(Node::ParaSep),
                // brackets have no special meaning in running text
                TokenKind::Text | TokenKind::BOptional | TokenKind::EOptional => {
                    nodes.append(Node::Text(tok.value))
                }
            }
        }

        let line = self.tokens.line();
        if math.is_some() {
            return Err(ParseError::unexpected_end("in inline math", line));
        }
        if end_at_brace {
            return Err(ParseError::unexpected_end("while looking for }", line));
        }
        match until {
            Until::Eof if bracelevel == 0 => Ok((nodes, Stop::Eof)),
            Until::Eof => Err(ParseError::unexpected_end("with unclosed group", line)),
            other => Err(ParseError::unexpected_end(other.describe(), line)),
        }
    }

    /// Consume `{name}` after an `\end` and check it closes `expected`
    pub(crate) fn finish_environment(&mut self, expected: &str, line: usize) -> ParseResult<()> {
        let mut args = self.parse_args("\\end", &[crate::core::config::ArgSlot::MandatoryText])?;
        let found = args.pop().unwrap_or(Node::Empty);
        let found = found.as_text().unwrap_or_default();
        if found != expected {
            return Err(ParseError::structural(
                format!(
                    "wrong closing environment: expected \\end{{{}}}, found \\end{{{}}}",
                    expected, found
                ),
                line,
            ));
        }
        Ok(())
    }

    fn dispatch_command(&mut self, tok: &Token) -> ParseResult<Node> {
        let name = tok.value.as_str();
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if !c.is_alphabetic() {
                return self.special_command(c, tok.line);
            }
        }
        if name == "end" {
            return Err(ParseError::structural("unexpected \\end outside of an environment", tok.line));
        }

        let config = self.config;
        match config.command(name) {
            Some(handler) => self.run_command(name, handler, tok.line),
            None => self.handle_unrecognized(name, tok.line),
        }
    }

    fn handle_unrecognized(&mut self, name: &str, line: usize) -> ParseResult<Node> {
        if self.config.is_killer(name) {
            return Err(ParseError::FatalCommand {
                name: name.to_string(),
                line,
            });
        }
        if !self.config.non_strict {
            return Err(ParseError::UnsupportedCommand {
                name: name.to_string(),
                line,
            });
        }
        if self.unrecognized.insert(name.to_string()) {
            debug!(command = name, line, "unrecognized command");
        }
        Ok(Node::Empty)
    }
}

/// Result of parsing one document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub root: RootNode,
    pub unrecognized: IndexSet<String>,
}

impl ParsedDocument {
    /// Aggregate warnings for the document
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        unrecognized_commands_report(&self.unrecognized)
            .into_iter()
            .collect()
    }
}

/// Parse a token stream into a document tree
pub fn parse_tokens(
    tokens: TokenStream,
    source: &str,
    config: &ParserConfig,
) -> ParseResult<ParsedDocument> {
    let mut parser = DocParser::new(tokens, source, config);
    let root = parser.parse()?;
    Ok(ParsedDocument {
        root,
        unrecognized: parser.unrecognized,
    })
}
