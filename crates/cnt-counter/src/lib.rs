//! Counter directive resolution.
//!
//! Resolves `cnt` directives in a [`cnt_tree::Node`] tree: named counters are
//! defined, reset and incremented as the document is walked in order, and
//! every counter reference is replaced by its value or by an inline error
//! marker.
//!
//! # Directives
//!
//! - `:cnt{name="fig" reset}` / `:cnt{name="fig" reset=5}`: define `fig`
//!   and assign it (the directive produces no output)
//! - `:cnt{name="fig" up}`: increment `fig` and insert the new value
//! - `:cnt{name="fig" look}` or `:cnt{name="fig"}`: insert the current value
//! - `:::cnt{reset}` container: each `## :cnt{name="sec"}` heading inside
//!   resets `sec` at every heading of that depth
//! - `:::cnt{increment}` container: each `## :cnt{name="sec"}` heading inside
//!   increments `sec` at every heading of that depth
//!
//! # Architecture
//!
//! - [`SimpleCounter`]: one integer with reset and increment triggers
//! - [`CounterRegistry`]: named counters and the per-node trigger broadcast
//! - [`DirectiveResolver`]: the two-pass rewrite (trigger definitions first,
//!   then references in document order)
//!
//! # Example
//!
//! ```
//! use cnt_counter::DirectiveResolver;
//! use cnt_tree::{DirectiveArgs, Node};
//!
//! let mut tree = Node::root(vec![Node::paragraph(vec![
//!     Node::text_directive("cnt", DirectiveArgs::parse("", r#"name="fig" reset"#)),
//!     Node::markup("Figure "),
//!     Node::text_directive("cnt", DirectiveArgs::parse("", r#"name="fig" up"#)),
//! ])]);
//!
//! let resolution = DirectiveResolver::default().process(&mut tree);
//!
//! assert!(resolution.errors.is_empty());
//! assert_eq!(
//!     tree,
//!     Node::root(vec![Node::paragraph(vec![Node::markup("Figure "), Node::text("1")])])
//! );
//! ```

mod counter;
mod error;
mod integer;
mod reference;
mod registry;
mod resolver;

pub use counter::SimpleCounter;
pub use error::ReferenceError;
pub use integer::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, to_safe_integer};
pub use reference::{Intent, Reference};
pub use registry::CounterRegistry;
pub use resolver::{DirectiveResolver, Resolution, define_triggers, resolve_references};

/// Directive name used when none is configured.
pub const DEFAULT_DIRECTIVE: &str = "cnt";
