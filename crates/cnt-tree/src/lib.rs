//! Document tree for counter directive resolution.
//!
//! This crate provides the typed [`Node`] tree produced by the markdown front
//! end and the traversal utilities used to rewrite it in place.
//!
//! # Architecture
//!
//! - [`Node`]: closed sum type over block and inline node kinds
//! - [`Position`]: structural descriptor (kind + heading depth) used as a
//!   counter trigger
//! - [`DirectiveArgs`]: label and attributes of a directive node
//! - [`visit`] / [`visit_parents`]: index-based pre-order walks whose
//!   visitors may replace or remove the node being visited
//!
//! # Example
//!
//! ```
//! use cnt_tree::{Action, Node, NodeKind, visit};
//!
//! let mut tree = Node::root(vec![
//!     Node::heading(1, vec![Node::markup("Title")]),
//!     Node::paragraph(vec![Node::markup("body")]),
//! ]);
//!
//! let mut kinds = Vec::new();
//! visit(&mut tree, |visit| {
//!     kinds.push(visit.node().kind());
//!     Action::Continue
//! });
//! assert_eq!(kinds[1], NodeKind::Heading);
//! ```

mod args;
mod node;
mod visit;

pub use args::{DirectiveArgs, is_valid_directive_name};
pub use node::{Node, NodeKind, Position};
pub use visit::{Action, Visit, visit, visit_parents};
