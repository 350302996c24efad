//! Document parsing.
//!
//! Container directive fences are found line by line, skipping fenced code.
//! The regions between them go to pulldown-cmark for their block structure.

use cnt_tree::{DirectiveArgs, Node};

use crate::blocks::parse_blocks;
use crate::fence::Fence;
use crate::syntax::{ContainerFence, parse_container_line};

/// Parse markdown into a document tree, discarding warnings.
///
/// # Example
///
/// ```
/// use cnt_markdown::parse;
/// use cnt_tree::Node;
///
/// let tree = parse("## Intro\n");
/// assert_eq!(
///     tree,
///     Node::root(vec![Node::heading(2, vec![Node::markup("Intro")])])
/// );
/// ```
#[must_use]
pub fn parse(input: &str) -> Node {
    MarkdownParser::new().parse(input)
}

/// Markdown parser that records structural warnings.
///
/// Parsing never fails: unclosed containers are closed at the end of the
/// document and stray closing fences are kept as text. Both produce a
/// warning.
#[derive(Debug, Default)]
pub struct MarkdownParser {
    warnings: Vec<String>,
}

impl MarkdownParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse markdown into a document tree.
    pub fn parse(&mut self, input: &str) -> Node {
        let mut containers = ContainerStack::default();
        let mut code: Option<Fence> = None;
        let mut region = 0;
        let mut offset = 0;

        for (idx, line) in input.split_inclusive('\n').enumerate() {
            let line_num = idx + 1;
            let line_start = offset;
            offset += line.len();
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(fence) = &code {
                if fence.is_closed_by(line) {
                    code = None;
                }
                continue;
            }
            if indentation(line) >= 4 {
                continue;
            }
            if let Some(fence) = Fence::open(line) {
                code = Some(fence);
                continue;
            }

            match parse_container_line(line) {
                Some(ContainerFence::Open {
                    name,
                    args,
                    colon_count,
                }) => {
                    containers.push_region(&input[region..line_start]);
                    containers.open.push(OpenContainer {
                        name,
                        args,
                        colon_count,
                        line: line_num,
                        children: Vec::new(),
                    });
                    region = offset;
                }
                Some(ContainerFence::Close { colon_count }) => {
                    if containers
                        .open
                        .last()
                        .is_some_and(|container| colon_count >= container.colon_count)
                    {
                        containers.push_region(&input[region..line_start]);
                        containers.close();
                        region = offset;
                    } else {
                        self.warn(format!(
                            "line {line_num}: stray {} with no opening directive",
                            ":".repeat(colon_count)
                        ));
                    }
                }
                None => {}
            }
        }

        containers.push_region(&input[region..]);
        while let Some(container) = containers.open.last() {
            self.warn(format!(
                "line {}: unclosed container directive :::{} (missing closing :::)",
                container.line, container.name
            ));
            containers.close();
        }

        tracing::debug!(
            blocks = containers.root.len(),
            warnings = self.warnings.len(),
            "Parsed markdown"
        );

        Node::root(containers.root)
    }

    fn warn(&mut self, warning: String) {
        tracing::warn!(%warning, "Malformed directive structure");
        self.warnings.push(warning);
    }

    /// Warnings collected by all `parse` calls so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Container directive whose closing fence has not been seen yet.
struct OpenContainer {
    name: String,
    args: DirectiveArgs,
    colon_count: usize,
    line: usize,
    children: Vec<Node>,
}

#[derive(Default)]
struct ContainerStack {
    root: Vec<Node>,
    open: Vec<OpenContainer>,
}

impl ContainerStack {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(container) => &mut container.children,
            None => &mut self.root,
        }
    }

    fn push_region(&mut self, region: &str) {
        let blocks = parse_blocks(region);
        self.current().extend(blocks);
    }

    fn close(&mut self) {
        if let Some(container) = self.open.pop() {
            let node = Node::container_directive(container.name, container.args, container.children);
            self.current().push(node);
        }
    }
}

/// Leading indentation in columns, with tabs to the next multiple of 4.
fn indentation(line: &str) -> usize {
    let mut columns = 0;
    for c in line.chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += 4 - columns % 4,
            _ => break,
        }
    }
    columns
}
