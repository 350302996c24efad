//! Directive-aware markdown front end for counter resolution.
//!
//! Turns markdown with `CommonMark` directive syntax into a [`cnt_tree::Node`]
//! tree and back:
//!
//! - [`MarkdownParser`] / [`parse`]: `:::` container directives found line
//!   by line, block structure from pulldown-cmark, inline text directives
//! - [`to_markdown`]: serializes a tree back to markdown
//! - [`to_html`]: renders a tree to HTML through pulldown-cmark
//!
//! Only directive syntax is parsed at the inline level. All other inline
//! markdown (emphasis, links, images) is kept verbatim as
//! [`Node::Markup`](cnt_tree::Node::Markup) and round-trips unchanged, as do
//! lists, block quotes, tables and code blocks.
//!
//! # Example
//!
//! ```
//! use cnt_markdown::{parse, to_markdown};
//!
//! let markdown = "# Title\n\nSee :cnt{name=\"fig\"} below.\n";
//! let tree = parse(markdown);
//! assert_eq!(to_markdown(&tree), markdown);
//! ```

mod blocks;
mod fence;
mod html;
mod inline;
mod parser;
mod serialize;
mod syntax;

pub use html::to_html;
pub use parser::{MarkdownParser, parse};
pub use serialize::to_markdown;
