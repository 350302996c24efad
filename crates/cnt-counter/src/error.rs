//! Reference error type.

use cnt_tree::Node;

/// A counter was referenced before any definition of its name.
///
/// Resolution never fails on this error: the offending directive is replaced
/// by a text node carrying the `Display` output, so the author sees the
/// problem at the exact position in the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("(ReferenceError: \"{name}\" is not defined)")]
pub struct ReferenceError {
    /// Counter name as written in the directive.
    pub name: String,
}

impl ReferenceError {
    /// Create an error for an undefined counter name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Text node placed in the tree instead of the failing directive.
    ///
    /// The node holds literal text, so markdown-significant characters in the
    /// name (such as `[`) are escaped by the serializer.
    #[must_use]
    pub fn to_node(&self) -> Node {
        Node::text(self.to_string())
    }
}
