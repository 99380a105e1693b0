//! Column spec and cell helpers

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::tree::{Node, NodeList};

lazy_static! {
    /// Brace groups inside a column spec (`p{2in}`, `@{}`)
    static ref SPEC_GROUP: Regex = Regex::new(r"\{[^}]*\}").unwrap();
}

/// Number of columns declared by a column spec.
///
/// Brace groups, `|` and whitespace are removed; every remaining character
/// counts as one column.
pub fn count_columns(colspec: &str) -> usize {
    SPEC_GROUP
        .replace_all(colspec, "")
        .chars()
        .filter(|c| *c != '|' && !c.is_whitespace())
        .count()
}

/// Split a parsed row on `&` into flattened cells
pub fn split_cells(row: NodeList) -> Vec<Node> {
    let mut cells = Vec::new();
    let mut current = NodeList::new();
    for node in row {
        if let Node::Ampersand = node {
            cells.push(std::mem::take(&mut current).flatten());
        } else {
            current.append(node);
        }
    }
    cells.push(current.flatten());
    cells
}
