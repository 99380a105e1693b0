//! Core parsing modules
//!
//! The pipeline is `lexer` -> `parser` -> `transform`:
//! - `tokens`: token kinds and the buffered token stream
//! - `lexer`: reference tokenizer producing a `TokenStream`
//! - `config`: command and environment handler tables
//! - `parser`: recursive-descent document parser
//! - `tree`: document tree types
//! - `search`: traversal and lookahead helpers over the tree
//! - `transform`: post-parse restructuring sweep

pub mod config;
pub mod lexer;
pub mod parser;
pub mod search;
pub mod tokens;
pub mod transform;
pub mod tree;

// Re-export main types and functions
pub use config::{ArgSlot, ArgSpec, CommandHandler, EnvironmentHandler, ExtLink, NodeShape, ParserConfig};
pub use lexer::tokenize;
pub use parser::{parse_tokens, DocParser, ParsedDocument};
pub use tokens::{Token, TokenKind, TokenStream};
pub use tree::{Node, NodeKind, NodeList, RootNode};
