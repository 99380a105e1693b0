//! Error handling for ltxdoc parsing
//!
//! This module provides a unified error type and result type for the
//! tokenizer, the parser and parser configuration.

use thiserror::Error;

/// Parse error type
///
/// Every fatal variant carries the source line it originated from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed or unbalanced grouping, wrong closing environment,
    /// ungrouped non-text argument, unterminated capture
    #[error("{message}, line {line}")]
    Structural { message: String, line: usize },

    /// Unknown command name (only fatal in strict mode)
    #[error("unsupported command \\{name}, line {line}")]
    UnsupportedCommand { name: String, line: usize },

    /// Unknown environment name
    #[error("no handler for {name} environment, line {line}")]
    UnsupportedEnvironment { name: String, line: usize },

    /// A text-only argument slot contains markup
    #[error("{command}: argument {index} must be text only, line {line}")]
    ContentConstraint {
        command: String,
        index: usize,
        line: usize,
    },

    /// A tabular environment without a single row matching its column spec
    #[error(
        "tabular environment has no rows matching the column spec {colspec:?} \
         ({columns} columns), line {line}"
    )]
    TableShape {
        colspec: String,
        columns: usize,
        line: usize,
    },

    /// A command on the configured killer list was encountered
    #[error("killer command \\{name} found, line {line}")]
    FatalCommand { name: String, line: usize },

    /// The tokenizer could not classify the input
    #[error("unexpected text on line {line}: {snippet:?}")]
    Lex { snippet: String, line: usize },

    /// A command or environment was registered with a bad argument spec
    #[error("invalid argument spec {spec:?} for {name}: unknown slot {slot:?}")]
    InvalidArgSpec { name: String, spec: String, slot: char },
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

// Convenience constructors for errors
impl ParseError {
    pub fn structural(message: impl Into<String>, line: usize) -> Self {
        ParseError::Structural {
            message: message.into(),
            line,
        }
    }

    pub fn unexpected_end(context: impl AsRef<str>, line: usize) -> Self {
        ParseError::Structural {
            message: format!("unexpected end of input {}", context.as_ref()),
            line,
        }
    }

    pub fn text_only(command: impl Into<String>, index: usize, line: usize) -> Self {
        ParseError::ContentConstraint {
            command: command.into(),
            index,
            line,
        }
    }

    /// Source line of the error, if it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Structural { line, .. }
            | ParseError::UnsupportedCommand { line, .. }
            | ParseError::UnsupportedEnvironment { line, .. }
            | ParseError::ContentConstraint { line, .. }
            | ParseError::TableShape { line, .. }
            | ParseError::FatalCommand { line, .. }
            | ParseError::Lex { line, .. } => Some(*line),
            ParseError::InvalidArgSpec { .. } => None,
        }
    }

    /// Whether a caller may skip the unit and carry on with other documents.
    ///
    /// Only configuration problems make every further parse fail as well.
    pub fn is_document_local(&self) -> bool {
        !matches!(self, ParseError::InvalidArgSpec { .. })
    }
}
