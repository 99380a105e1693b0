//! Ordered node container with merge rules

use super::Node;

/// An ordered sequence of sibling nodes.
///
/// `append` keeps the sequence normalized: Empty nodes are dropped, text runs
/// are merged into the preceding plain text node, nested lists are spliced in
/// and a paragraph separator never directly precedes a verbatim block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, node: Node) {
        match node {
            Node::Empty => {}
            Node::NodeList(list) => {
                for node in list.nodes {
                    self.append(node);
                }
            }
            node => {
                if let (Some(Node::Text(prev)), Some(text)) = (self.nodes.last_mut(), node.as_text()) {
                    prev.push_str(text);
                    return;
                }
                if matches!(node, Node::Verbatim(_)) && matches!(self.nodes.last(), Some(Node::ParaSep)) {
                    self.nodes.pop();
                }
                self.nodes.push(node);
            }
        }
    }

    /// Zero nodes become Empty, a single node is unwrapped
    pub fn flatten(mut self) -> Node {
        match self.nodes.len() {
            0 => Node::Empty,
            1 => self.nodes.pop().unwrap_or(Node::Empty),
            _ => Node::NodeList(self),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut list = NodeList::new();
        for node in iter {
            list.append(node);
        }
        list
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
