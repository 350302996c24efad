//! HTML rendering through pulldown-cmark.

use cnt_tree::Node;
use pulldown_cmark::{Parser, html};

use crate::blocks::parser_options;
use crate::to_markdown;

/// Render a document tree to HTML.
///
/// The tree is serialized to markdown first, so resolved counters and
/// escaped error markers render exactly as they would after writing the
/// markdown out. Directives left in the tree are rendered as plain text.
///
/// # Example
///
/// ```
/// use cnt_markdown::to_html;
/// use cnt_tree::Node;
///
/// let tree = Node::root(vec![Node::paragraph(vec![
///     Node::markup("Figure "),
///     Node::text("3"),
/// ])]);
/// assert_eq!(to_html(&tree), "<p>Figure 3</p>\n");
/// ```
#[must_use]
pub fn to_html(tree: &Node) -> String {
    let markdown = to_markdown(tree);

    let parser = Parser::new_ext(&markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_and_paragraph() {
        let tree = parse("# Title\n\nfig 1\n");
        assert_eq!(to_html(&tree), "<h1>Title</h1>\n<p>fig 1</p>\n");
    }

    #[test]
    fn test_escaped_error_marker_renders_brackets() {
        let tree = Node::root(vec![Node::paragraph(vec![Node::text(
            r#"(ReferenceError: "[bar]" is not defined)"#,
        )])]);
        assert_eq!(
            to_html(&tree),
            "<p>(ReferenceError: &quot;[bar]&quot; is not defined)</p>\n"
        );
    }

    #[test]
    fn test_number_opening_paragraph_renders_as_paragraph() {
        let tree = Node::root(vec![Node::paragraph(vec![
            Node::text("1"),
            Node::markup(". Item"),
        ])]);
        assert_eq!(to_html(&tree), "<p>1. Item</p>\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_html(&Node::default()), "");
    }
}
