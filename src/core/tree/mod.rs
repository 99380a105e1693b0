//! Document tree
//!
//! A closed set of node variants produced by the parser and consumed by an
//! external writer. Every node can `walk()` its traversable children; some
//! variants (inline markup, index markers, tables, raw blocks) deliberately
//! expose none so generic traversal does not descend into them.
//!
//! # Module Structure
//!
//! - `nodelist`: the `NodeList` container and its merge rules
//! - `root`: the `RootNode` at the top of a parsed document

mod nodelist;
mod root;

pub use nodelist::NodeList;
pub use root::RootNode;

/// A node of the document tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", content = "data")
)]
pub enum Node {
    /// A source comment
    Comment(String),
    /// Plain text
    Text(String),
    /// A table-of-contents marker holding its title
    Toc(Box<Node>),
    /// Nothing; dropped when appended to a `NodeList`
    Empty,
    /// A non-breaking space
    Nbsp,
    /// A command that maps directly to fixed text (`\ldots`, `\Cpp`, ...)
    SimpleCmd { name: String, text: String },
    /// Paragraph separator
    ParaSep,
    /// Line break (`\\`)
    Break,
    /// Cell separator inside tables
    Ampersand,
    /// Graphics placeholder
    Graphics,
    Command(CommandNode),
    Inline(InlineNode),
    Index(IndexNode),
    Sectioning(CommandNode),
    Environment(EnvironmentNode),
    DescEnvironment(DescEnvironmentNode),
    Float(FloatNode),
    Tabular(TabularNode),
    /// Literal block; holds a text node (or parsed `alltt` content)
    Verbatim(Box<Node>),
    Listing(ListingNode),
    /// Literal block passed through to the target markup unchanged
    RstVerbatim(Box<Node>),
    Math(MathNode),
    List(ListNode),
    NodeList(NodeList),
}

/// Variant tag of a node, used by searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Comment,
    Text,
    Toc,
    Empty,
    Nbsp,
    SimpleCmd,
    ParaSep,
    Break,
    Ampersand,
    Graphics,
    Command,
    ExtLink,
    DescLineCommand,
    Inline,
    Index,
    Sectioning,
    Environment,
    DescEnvironment,
    Figure,
    Table,
    Tabular,
    Verbatim,
    Listing,
    RstVerbatim,
    Math,
    Itemize,
    Enumerate,
    Description,
    Definitions,
    ProductionList,
    NodeList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CommandKind {
    Plain,
    /// A caller-registered external link command
    ExtLink,
    /// An additional signature line of a description environment
    DescLine,
}

/// A general command with its arguments
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandNode {
    pub kind: CommandKind,
    pub name: String,
    pub args: Vec<Node>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>, args: Vec<Node>) -> Self {
        CommandNode {
            kind: CommandKind::Plain,
            name: name.into(),
            args,
        }
    }

    pub fn with_kind(kind: CommandKind, name: impl Into<String>, args: Vec<Node>) -> Self {
        CommandNode {
            kind,
            name: name.into(),
            args,
        }
    }
}

/// Inline markup (`\code{...}`, `\emph{...}`, inline math)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineNode {
    pub name: String,
    pub args: Vec<Node>,
}

/// An index-generating command.
///
/// Its arguments are not generic children, which keeps index entries silent
/// inside paragraphs; writers read them through `index_args`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexNode {
    pub name: String,
    pub index_args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnvironmentNode {
    pub name: String,
    pub args: Vec<Node>,
    pub content: Box<Node>,
}

/// Additional signature line collected by the transform pass
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DescLine {
    pub name: String,
    pub args: Vec<Node>,
}

/// An API description environment (`funcdesc`, `classdesc`, ...)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DescEnvironmentNode {
    pub name: String,
    pub args: Vec<Node>,
    pub content: Box<Node>,
    pub additional: Vec<DescLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FloatKind {
    Figure,
    Table,
}

/// Metadata harvested from a float's content
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FloatOptions {
    pub label: Option<String>,
    pub caption: Option<Box<Node>>,
    /// Code listing carried by a figure
    pub listing: Option<Box<Node>>,
    pub align: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FloatNode {
    pub kind: FloatKind,
    pub name: String,
    pub args: Vec<Node>,
    pub content: Box<Node>,
    pub options: FloatOptions,
}

/// A table with a fixed number of columns
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TabularNode {
    pub columns: usize,
    pub headings: Vec<Node>,
    pub rows: Vec<Vec<Node>>,
    /// Column spec as written, for free-form tabulars
    pub colspec: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListingNode {
    pub content: Box<Node>,
    pub args: Vec<Node>,
}

/// A display math block
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MathNode {
    /// One text node per source line
    pub content: Vec<Node>,
    pub label: Option<String>,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ListKind {
    Itemize,
    Enumerate,
    Description,
    Definitions,
    ProductionList,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListItem {
    pub label: Node,
    pub content: Node,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListNode {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
    /// Production group of a production list
    pub group: Option<Box<Node>>,
}

impl ListNode {
    pub fn new(kind: ListKind, items: Vec<ListItem>) -> Self {
        ListNode {
            kind,
            items,
            group: None,
        }
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Node {
        Node::Text(s.into())
    }

    pub fn command(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Command(CommandNode::new(name, args))
    }

    pub fn inline(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Inline(InlineNode {
            name: name.into(),
            args,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Comment(_) => NodeKind::Comment,
            Node::Text(_) => NodeKind::Text,
            Node::Toc(_) => NodeKind::Toc,
            Node::Empty => NodeKind::Empty,
            Node::Nbsp => NodeKind::Nbsp,
            Node::SimpleCmd { .. } => NodeKind::SimpleCmd,
            Node::ParaSep => NodeKind::ParaSep,
            Node::Break => NodeKind::Break,
            Node::Ampersand => NodeKind::Ampersand,
            Node::Graphics => NodeKind::Graphics,
            Node::Command(cmd) => match cmd.kind {
                CommandKind::Plain => NodeKind::Command,
                CommandKind::ExtLink => NodeKind::ExtLink,
                CommandKind::DescLine => NodeKind::DescLineCommand,
            },
            Node::Inline(_) => NodeKind::Inline,
            Node::Index(_) => NodeKind::Index,
            Node::Sectioning(_) => NodeKind::Sectioning,
            Node::Environment(_) => NodeKind::Environment,
            Node::DescEnvironment(_) => NodeKind::DescEnvironment,
            Node::Float(f) => match f.kind {
                FloatKind::Figure => NodeKind::Figure,
                FloatKind::Table => NodeKind::Table,
            },
            Node::Tabular(_) => NodeKind::Tabular,
            Node::Verbatim(_) => NodeKind::Verbatim,
            Node::Listing(_) => NodeKind::Listing,
            Node::RstVerbatim(_) => NodeKind::RstVerbatim,
            Node::Math(_) => NodeKind::Math,
            Node::List(list) => match list.kind {
                ListKind::Itemize => NodeKind::Itemize,
                ListKind::Enumerate => NodeKind::Enumerate,
                ListKind::Description => NodeKind::Description,
                ListKind::Definitions => NodeKind::Definitions,
                ListKind::ProductionList => NodeKind::ProductionList,
            },
            Node::NodeList(_) => NodeKind::NodeList,
        }
    }

    /// Text carried by a text-like node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            Node::SimpleCmd { text, .. } => Some(text),
            Node::Empty => Some(""),
            Node::Nbsp => Some(" "),
            _ => None,
        }
    }

    /// Whether the node satisfies a text-only argument slot
    pub fn is_text_like(&self) -> bool {
        matches!(self, Node::Toc(_)) || self.as_text().is_some()
    }

    pub fn is_empty_node(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Name of a command-like node
    pub fn command_name(&self) -> Option<&str> {
        match self {
            Node::Command(cmd) | Node::Sectioning(cmd) => Some(&cmd.name),
            Node::Inline(inline) => Some(&inline.name),
            Node::Index(index) => Some(&index.name),
            _ => None,
        }
    }

    /// Traversable children
    pub fn walk(&self) -> Walk<'_> {
        let inner = match self {
            Node::Command(cmd) | Node::Sectioning(cmd) => WalkInner::Nodes(cmd.args.iter()),
            Node::Environment(env) => WalkInner::One(Some(&env.content)),
            Node::DescEnvironment(env) => WalkInner::One(Some(&env.content)),
            Node::Float(float) => WalkInner::One(Some(&float.content)),
            Node::List(list) => WalkInner::Items(list.items.iter()),
            Node::NodeList(list) => WalkInner::Nodes(list.iter()),
            _ => WalkInner::None,
        };
        Walk(inner)
    }

    /// Mutable counterpart of `walk`, same children in the same order
    pub fn walk_mut(&mut self) -> WalkMut<'_> {
        let inner = match self {
            Node::Command(cmd) | Node::Sectioning(cmd) => WalkMutInner::Nodes(cmd.args.iter_mut()),
            Node::Environment(env) => WalkMutInner::One(Some(&mut env.content)),
            Node::DescEnvironment(env) => WalkMutInner::One(Some(&mut env.content)),
            Node::Float(float) => WalkMutInner::One(Some(&mut float.content)),
            Node::List(list) => WalkMutInner::Items(list.items.iter_mut()),
            Node::NodeList(list) => WalkMutInner::Nodes(list.iter_mut()),
            _ => WalkMutInner::None,
        };
        WalkMut(inner)
    }
}

/// Lazy iterator over a node's traversable children
pub struct Walk<'a>(WalkInner<'a>);

enum WalkInner<'a> {
    None,
    One(Option<&'a Node>),
    Nodes(std::slice::Iter<'a, Node>),
    Items(std::slice::Iter<'a, ListItem>),
}

impl<'a> Walk<'a> {
    pub(crate) fn over(nodes: &'a [Node]) -> Self {
        Walk(WalkInner::Nodes(nodes.iter()))
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        match &mut self.0 {
            WalkInner::None => None,
            WalkInner::One(node) => node.take(),
            WalkInner::Nodes(iter) => iter.next(),
            WalkInner::Items(iter) => iter.next().map(|item| &item.content),
        }
    }
}

pub struct WalkMut<'a>(WalkMutInner<'a>);

enum WalkMutInner<'a> {
    None,
    One(Option<&'a mut Node>),
    Nodes(std::slice::IterMut<'a, Node>),
    Items(std::slice::IterMut<'a, ListItem>),
}

impl<'a> WalkMut<'a> {
    pub(crate) fn over(nodes: &'a mut [Node]) -> Self {
        WalkMut(WalkMutInner::Nodes(nodes.iter_mut()))
    }
}

impl<'a> Iterator for WalkMut<'a> {
    type Item = &'a mut Node;

    fn next(&mut self) -> Option<&'a mut Node> {
        match &mut self.0 {
            WalkMutInner::None => None,
            WalkMutInner::One(node) => node.take(),
            WalkMutInner::Nodes(iter) => iter.next(),
            WalkMutInner::Items(iter) => iter.next().map(|item| &mut item.content),
        }
    }
}
