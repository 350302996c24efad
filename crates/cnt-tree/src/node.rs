//! Tree node types.

use std::fmt;

use crate::DirectiveArgs;

/// Node in a parsed document tree.
///
/// Block nodes (`Root`, `Heading`, `Paragraph`, `ContainerDirective`,
/// `Block`) own their children. `Code` and the inline nodes (`Text`,
/// `Markup`, `TextDirective`) are leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Node {
    /// Document root.
    Root { children: Vec<Node> },
    /// Heading (ATX or setext) with its nesting level (1-6).
    Heading { depth: u8, children: Vec<Node> },
    /// Paragraph of inline content.
    Paragraph { children: Vec<Node> },
    /// Container directive: `:::name[label]{attrs}` ... `:::`.
    ContainerDirective {
        name: String,
        args: DirectiveArgs,
        children: Vec<Node>,
    },
    /// Compound block (list, block quote, table, ...) kept as source.
    ///
    /// `Markup` children hold its syntax verbatim. The headings and
    /// paragraphs it contains are `Heading` and `Paragraph` children whose
    /// own children cover only their inline content.
    Block { children: Vec<Node> },
    /// Fenced or indented code block, verbatim. Never scanned for directives.
    Code { value: String },
    /// Literal text, escaped when serialized.
    Text { value: String },
    /// Inline markdown source kept verbatim (emphasis, links, images, ...).
    Markup { value: String },
    /// Text directive: `:name[label]{attrs}`.
    TextDirective { name: String, args: DirectiveArgs },
}

impl Default for Node {
    fn default() -> Self {
        Self::Root {
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Create a root node.
    #[must_use]
    pub fn root(children: Vec<Node>) -> Self {
        Self::Root { children }
    }

    /// Create a heading node.
    #[must_use]
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Self::Heading { depth, children }
    }

    /// Create a paragraph node.
    #[must_use]
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph { children }
    }

    /// Create a container directive node.
    #[must_use]
    pub fn container_directive(
        name: impl Into<String>,
        args: DirectiveArgs,
        children: Vec<Node>,
    ) -> Self {
        Self::ContainerDirective {
            name: name.into(),
            args,
            children,
        }
    }

    /// Create a compound block node.
    #[must_use]
    pub fn block(children: Vec<Node>) -> Self {
        Self::Block { children }
    }

    /// Create a code block node.
    #[must_use]
    pub fn code(value: impl Into<String>) -> Self {
        Self::Code {
            value: value.into(),
        }
    }

    /// Create a literal text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Create a verbatim markup node.
    #[must_use]
    pub fn markup(value: impl Into<String>) -> Self {
        Self::Markup {
            value: value.into(),
        }
    }

    /// Create a text directive node.
    #[must_use]
    pub fn text_directive(name: impl Into<String>, args: DirectiveArgs) -> Self {
        Self::TextDirective {
            name: name.into(),
            args,
        }
    }

    /// Kind tag of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Root { .. } => NodeKind::Root,
            Self::Heading { .. } => NodeKind::Heading,
            Self::Paragraph { .. } => NodeKind::Paragraph,
            Self::ContainerDirective { .. } => NodeKind::ContainerDirective,
            Self::Block { .. } => NodeKind::Block,
            Self::Code { .. } => NodeKind::Code,
            Self::Text { .. } => NodeKind::Text,
            Self::Markup { .. } => NodeKind::Markup,
            Self::TextDirective { .. } => NodeKind::TextDirective,
        }
    }

    /// Intrinsic nesting level. Only headings have one.
    #[must_use]
    pub fn depth(&self) -> Option<u8> {
        match self {
            Self::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    /// Structural position descriptor of this node.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            kind: self.kind(),
            depth: self.depth(),
        }
    }

    /// Child nodes, if this node can have any.
    #[must_use]
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Self::Root { children }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::ContainerDirective { children, .. }
            | Self::Block { children } => Some(children),
            Self::Code { .. } | Self::Text { .. } | Self::Markup { .. } | Self::TextDirective { .. } => {
                None
            }
        }
    }

    /// Mutable child nodes, if this node can have any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Root { children }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::ContainerDirective { children, .. }
            | Self::Block { children } => Some(children),
            Self::Code { .. } | Self::Text { .. } | Self::Markup { .. } | Self::TextDirective { .. } => {
                None
            }
        }
    }

    /// Check whether this is a container directive with the given name.
    #[must_use]
    pub fn is_container_directive(&self, directive: &str) -> bool {
        matches!(self, Self::ContainerDirective { name, .. } if name == directive)
    }

    /// Check whether this is a text directive with the given name.
    #[must_use]
    pub fn is_text_directive(&self, directive: &str) -> bool {
        matches!(self, Self::TextDirective { name, .. } if name == directive)
    }
}

/// Kind tag of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NodeKind {
    Root,
    Heading,
    Paragraph,
    ContainerDirective,
    Block,
    Code,
    Text,
    Markup,
    TextDirective,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Root => "root",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::ContainerDirective => "containerDirective",
            Self::Block => "block",
            Self::Code => "code",
            Self::Text => "text",
            Self::Markup => "markup",
            Self::TextDirective => "textDirective",
        };
        f.write_str(name)
    }
}

/// Structural position descriptor: node kind plus nesting depth.
///
/// Two positions match only when both fields are equal, so a heading
/// trigger at depth 2 never matches a heading at depth 3 nor any node
/// kind without a depth.
///
/// # Example
///
/// ```
/// use cnt_tree::{Node, Position};
///
/// let heading = Node::heading(2, Vec::new());
/// assert_eq!(heading.position(), Position::heading(2));
/// assert_ne!(heading.position(), Position::heading(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Node kind.
    pub kind: NodeKind,
    /// Nesting depth, `None` for kinds without one.
    pub depth: Option<u8>,
}

impl Position {
    /// Create a position descriptor.
    #[must_use]
    pub const fn new(kind: NodeKind, depth: Option<u8>) -> Self {
        Self { kind, depth }
    }

    /// Position of a heading at the given depth.
    #[must_use]
    pub const fn heading(depth: u8) -> Self {
        Self::new(NodeKind::Heading, Some(depth))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth {
            Some(depth) => write!(f, "{}({depth})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
