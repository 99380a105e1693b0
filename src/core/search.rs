//! Tree searches
//!
//! All searches follow `Node::walk`, so arguments of index commands and the
//! content of literal blocks are never visited.

use crate::core::tree::{Node, NodeKind, Walk};

/// Depth-first pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    stack: Vec<Walk<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.walk());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Descendants of `node`, not including `node` itself
pub fn descendants(node: &Node) -> Descendants<'_> {
    Descendants {
        stack: vec![node.walk()],
    }
}

/// `nodes` and all of their descendants
pub fn descendants_of(nodes: &[Node]) -> Descendants<'_> {
    Descendants {
        stack: vec![Walk::over(nodes)],
    }
}

/// Top-level items of a content node: the elements of a node list, or the
/// node itself
pub fn content_slice(node: &Node) -> &[Node] {
    match node {
        Node::NodeList(list) => list.as_slice(),
        other => std::slice::from_ref(other),
    }
}

fn label_text<'a>(mut nodes: impl Iterator<Item = &'a Node>) -> Option<String> {
    let label = nodes.find(|node| matches!(node, Node::Command(cmd) if cmd.name == "label"))?;
    match label {
        Node::Command(cmd) => cmd
            .args
            .first()
            .and_then(Node::as_text)
            .map(str::to_lowercase),
        _ => None,
    }
}

fn caption<'a>(mut nodes: impl Iterator<Item = &'a Node>) -> Option<&'a Node> {
    nodes.find(|node| matches!(node, Node::Command(cmd) if cmd.name == "caption"))
}

/// Lower-cased text of the first `\label` below `node`
pub fn find_label(node: &Node) -> Option<String> {
    label_text(descendants(node))
}

/// Lower-cased text of the first `\label` in `nodes` or below
pub fn find_label_in(nodes: &[Node]) -> Option<String> {
    label_text(descendants_of(nodes))
}

/// First `\caption` command below `node`
pub fn find_caption_node(node: &Node) -> Option<&Node> {
    caption(descendants(node))
}

/// First `\caption` command in `nodes` or below
pub fn find_caption_node_in(nodes: &[Node]) -> Option<&Node> {
    caption(descendants_of(nodes))
}

/// First node of the given kind below `node`
pub fn find_subnode(node: &Node, kind: NodeKind) -> Option<&Node> {
    descendants(node).find(|n| n.kind() == kind)
}

/// Every node of the given kind below `node`, in document order
pub fn find_all(node: &Node, kind: NodeKind) -> Vec<&Node> {
    descendants(node).filter(|n| n.kind() == kind).collect()
}
