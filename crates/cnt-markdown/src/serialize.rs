//! Markdown serialization.

use cnt_tree::{DirectiveArgs, Node};

/// Serialize a document tree to markdown.
///
/// Blocks are separated by a blank line and the output ends with a single
/// newline (an empty document serializes to an empty string). Container
/// fences get one extra colon per level of nested containers so the output
/// parses back to the same structure.
///
/// # Example
///
/// ```
/// use cnt_markdown::to_markdown;
/// use cnt_tree::Node;
///
/// let tree = Node::root(vec![
///     Node::heading(2, vec![Node::markup("Figures")]),
///     Node::paragraph(vec![Node::markup("fig "), Node::text("1")]),
/// ]);
/// assert_eq!(to_markdown(&tree), "## Figures\n\nfig 1\n");
/// ```
#[must_use]
pub fn to_markdown(tree: &Node) -> String {
    let mut out = String::new();
    match tree {
        Node::Root { children } => write_blocks(children, &mut out),
        node => write_block(node, &mut out),
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn write_blocks(blocks: &[Node], out: &mut String) {
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n\n");
        }
        write_block(block, out);
    }
}

fn write_block(node: &Node, out: &mut String) {
    match node {
        Node::Root { children } => write_blocks(children, out),
        Node::Heading { depth, children } => write_heading(*depth, children, out),
        Node::Paragraph { children } => write_inline(children, true, out),
        Node::ContainerDirective {
            name,
            args,
            children,
        } => {
            let fence = ":".repeat(3 + container_nesting(children));
            write_directive(&fence, name, args, out);
            out.push('\n');
            if !children.is_empty() {
                write_blocks(children, out);
                out.push('\n');
            }
            out.push_str(&fence);
        }
        Node::Block { children } => write_compound(children, out),
        Node::Code { value } => out.push_str(value),
        Node::Text { .. } | Node::Markup { .. } | Node::TextDirective { .. } => {
            write_inline(std::slice::from_ref(node), true, out);
        }
    }
}

/// Write a heading in ATX form, or setext when its content spans lines.
fn write_heading(depth: u8, children: &[Node], out: &mut String) {
    let mut content = String::new();
    write_inline(children, false, &mut content);

    if content.contains('\n') && depth <= 2 {
        out.push_str(&content);
        out.push_str(if depth == 1 { "\n===" } else { "\n---" });
        return;
    }

    out.push_str(&"#".repeat(usize::from(depth)));
    if !content.is_empty() {
        out.push(' ');
        out.push_str(&content);
    }
}

/// Write a compound block. Its markup children already hold the syntax
/// around each heading and paragraph.
fn write_compound(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Heading { children, .. } => write_inline(children, false, out),
            Node::Paragraph { children } => write_inline(children, true, out),
            node => write_block(node, out),
        }
    }
}

/// Write inline nodes. `block_start` tells whether the first node opens a
/// line of block content, where text could be read as a block marker.
fn write_inline(nodes: &[Node], block_start: bool, out: &mut String) {
    let base = out.len();
    let mut line_starts = Vec::new();

    for node in nodes {
        match node {
            Node::Text { value } => {
                if (block_start && out.len() == base) || out[base..].ends_with('\n') {
                    line_starts.push(out.len());
                }
                escape_text(value, out);
            }
            Node::Markup { value } => out.push_str(value),
            Node::TextDirective { name, args } => write_directive(":", name, args, out),
            block => write_block(block, out),
        }
    }

    for offset in line_starts.into_iter().rev() {
        escape_line_start(out, offset);
    }
}

fn write_directive(fence: &str, name: &str, args: &DirectiveArgs, out: &mut String) {
    out.push_str(fence);
    out.push_str(name);
    out.push_str(&args.to_syntax());
}

/// Deepest chain of container directives below `children`.
fn container_nesting(children: &[Node]) -> usize {
    children
        .iter()
        .filter_map(|child| match child {
            Node::ContainerDirective { children, .. } => Some(1 + container_nesting(children)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Escape characters that would otherwise start inline markup.
fn escape_text(value: &str, out: &mut String) {
    for c in value.chars() {
        if matches!(c, '\\' | '[' | '*' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Escape a list, heading, quote or setext marker that text put at the
/// start of a line (`1. Item` becomes `1\. Item`).
fn escape_line_start(out: &mut String, offset: usize) {
    let rest = &out[offset..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();

    let marker = if digits > 0 {
        (digits <= 9
            && rest[digits..].starts_with(['.', ')'])
            && ends_marker(&rest[digits + 1..]))
        .then_some(offset + digits)
    } else {
        match rest.bytes().next() {
            Some(b'#' | b'>') => Some(offset),
            Some(b'-' | b'+' | b'=') if ends_marker(&rest[1..]) => Some(offset),
            _ => None,
        }
    };

    if let Some(at) = marker {
        out.insert(at, '\\');
    }
}

fn ends_marker(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with([' ', '\t', '\n'])
}
