//! Inline content splitting.
//!
//! Splits inline markdown into text directives and verbatim markup runs.

use cnt_tree::Node;

use crate::syntax::parse_text_directive;

/// Split inline content into [`Node::TextDirective`] and [`Node::Markup`] nodes.
///
/// A colon opens a text directive only when it is not part of a colon run
/// (`::`), not escaped, and not inside a code span. Colons that fail to
/// parse as a directive stay in the surrounding markup.
pub(crate) fn parse_inline(text: &str) -> Vec<Node> {
    let bytes = text.as_bytes();
    let mut nodes = Vec::new();
    let mut run_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                let escaped = text[pos + 1..].chars().next().map_or(0, char::len_utf8);
                pos += 1 + escaped;
            }
            b'`' => pos = skip_code_span(text, pos),
            b':' if is_single_colon(bytes, pos) => {
                if let Some((name, args, consumed)) = parse_text_directive(&text[pos..]) {
                    if run_start < pos {
                        nodes.push(Node::markup(&text[run_start..pos]));
                    }
                    nodes.push(Node::text_directive(name, args));
                    pos += consumed;
                    run_start = pos;
                } else {
                    pos += 1;
                }
            }
            _ => pos += 1,
        }
    }

    if run_start < text.len() {
        nodes.push(Node::markup(&text[run_start..]));
    }

    nodes
}

fn is_single_colon(bytes: &[u8], pos: usize) -> bool {
    let before = pos.checked_sub(1).map(|i| bytes[i]);
    let after = bytes.get(pos + 1).copied();
    before != Some(b':') && after != Some(b':')
}

/// Return the byte offset just past the code span starting at `start`.
///
/// An unmatched backtick run is literal and only the run itself is skipped.
fn skip_code_span(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let run = bytes[start..].iter().take_while(|&&b| b == b'`').count();
    let mut pos = start + run;

    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let closing = bytes[pos..].iter().take_while(|&&b| b == b'`').count();
            if closing == run {
                return pos + closing;
            }
            pos += closing;
        } else {
            pos += 1;
        }
    }

    start + run
}
