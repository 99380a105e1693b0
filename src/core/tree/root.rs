//! Top of a parsed document

use indexmap::IndexMap;

use super::{Node, NodeList, Walk, WalkMut};

/// A whole document
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RootNode {
    /// Source identifier, usually the file name
    pub source: String,
    pub children: NodeList,
    /// Document metadata (`\title`, `\author`, ...); last write wins
    pub params: IndexMap<String, Node>,
    /// Reserved for cross-reference resolution by the writer
    pub labels: IndexMap<String, Node>,
}

impl RootNode {
    pub fn new(source: impl Into<String>, children: NodeList) -> Self {
        RootNode {
            source: source.into(),
            children,
            params: IndexMap::new(),
            labels: IndexMap::new(),
        }
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk::over(self.children.as_slice())
    }

    pub fn walk_mut(&mut self) -> WalkMut<'_> {
        WalkMut::over(self.children.as_mut_slice())
    }

    /// Metadata value stored under `key`, as text if it is text-like
    pub fn param_text(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Node::as_text)
    }

    /// Run the post-parse restructuring sweep
    pub fn transform(&mut self) {
        crate::core::transform::transform(self);
    }
}
