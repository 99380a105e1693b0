//! Data layer - Static mappings and tables
//!
//! This module contains all static data used by the parser:
//! - Command and environment tables with their argument specs
//! - Fixed text for simple commands
//! - Accent composition

pub mod commands;
pub mod symbols;

// Re-export commonly used items
pub use commands::{
    DEFAULT_KILLER_COMMANDS, DESC_ENVIRONMENTS, DESC_LINE_COMMANDS, FIXED_TABLES,
    IGNORED_COMMANDS, INDEX_COMMANDS, INLINE_COMMANDS, MATH_ENVIRONMENTS, METADATA_COMMANDS,
    PLAIN_COMMANDS, PLAIN_ENVIRONMENTS, SECTIONING_COMMANDS, TRANSPARENT_ENVIRONMENTS,
};
pub use symbols::{compose_accent, ACCENTED, SIMPLE_TEXT};
