//! # ltxdoc
//!
//! Parser for documentation-flavoured LaTeX into a structured document tree.
//!
//! ## Features
//!
//! - **Table-driven**: commands and environments are declared with compact
//!   argument specs (`M`, `T`, `O`, `Q`) and expanded into handlers once
//! - **Structured output**: sections, API descriptions, lists, tables, floats,
//!   verbatim blocks and display math become dedicated node variants
//! - **Forgiving**: unknown commands are skipped and reported once per
//!   document; strict mode turns them into errors
//! - **Serializable**: with the `serde` feature the tree serializes to JSON
//!
//! ## Usage Examples
//!
//! ```rust
//! use ltxdoc::{parse_document, Node};
//!
//! let doc = parse_document(r"\section{Intro}Hello \emph{world}", "intro.tex").unwrap();
//! assert_eq!(doc.root.children.len(), 3);
//! assert!(matches!(doc.root.children.get(0), Some(Node::Sectioning(_))));
//! assert!(doc.unrecognized.is_empty());
//! ```
//!
//! ### Custom Configuration
//!
//! ```rust
//! use ltxdoc::{parse_document_with_config, ParserConfig};
//!
//! let config = ParserConfig::new().with_extlink("issue", "https://bugs.example.org/%s", "issue ");
//! let doc = parse_document_with_config(r"See \issue{42}.", "news.tex", &config).unwrap();
//! assert!(doc.unrecognized.is_empty());
//! ```

/// Core parsing modules
pub mod core;

/// Data layer - command tables and fixed text
pub mod data;

/// Utility modules
pub mod utils;

pub use core::config::{ArgSlot, ArgSpec, ExtLink, NodeShape, ParserConfig};
pub use core::lexer::tokenize;
pub use core::parser::{parse_tokens, DocParser, ParsedDocument};
pub use core::search;
pub use core::tokens::{Token, TokenKind, TokenStream};
pub use core::tree;
pub use core::tree::{Node, NodeKind, NodeList, RootNode};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ParseError, ParseResult};

/// Parse a document with the default configuration
///
/// # Arguments
/// * `input` - document source
/// * `source` - source identifier stored in the root node, usually the file name
pub fn parse_document(input: &str, source: &str) -> ParseResult<ParsedDocument> {
    parse_document_with_config(input, source, &ParserConfig::default())
}

/// Parse a document with a custom configuration
pub fn parse_document_with_config(
    input: &str,
    source: &str,
    config: &ParserConfig,
) -> ParseResult<ParsedDocument> {
    let tokens = tokenize(input)?;
    parse_tokens(tokens, source, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_sets_source() {
        let doc = parse_document("text", "a.tex").unwrap();
        assert_eq!(doc.root.source, "a.tex");
        assert_eq!(doc.root.children.flatten(), Node::text("text"));
    }

    #[test]
    fn test_strict_config_rejects_unknown() {
        let err = parse_document_with_config("\\frob", "a.tex", &ParserConfig::strict()).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedCommand { .. }));
    }

    #[test]
    fn test_unrecognized_are_reported() {
        let doc = parse_document("\\frob{x} y", "a.tex").unwrap();
        assert_eq!(doc.unrecognized.iter().collect::<Vec<_>>(), vec!["frob"]);
        assert_eq!(doc.diagnostics().len(), 1);
    }

    #[test]
    fn test_report_is_left_to_the_caller() {
        let config = ParserConfig::new();
        let mut parser = DocParser::new(tokenize("\\frob \\frob \\frob").unwrap(), "a.tex", &config);
        parser.parse().unwrap();
        let report = parser.finish();
        assert_eq!(report.len(), 1);
        assert!(report[0].message.ends_with("\\frob"));
        assert_eq!(parser.unrecognized().len(), 1);
    }
}
