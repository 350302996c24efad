//! Block structure of a region through pulldown-cmark.
//!
//! Top-level headings and paragraphs are rebuilt from their inline content.
//! Every other block keeps its source slice: code blocks and HTML as they
//! are, compound blocks (lists, block quotes, tables) as [`Node::Block`]
//! with the headings and paragraphs they hold split out so directives in
//! them still resolve.

use std::ops::Range;

use cnt_tree::Node;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::inline::parse_inline;

/// pulldown-cmark options used for block scanning and HTML rendering.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Parse a region without container fences into block nodes.
pub(crate) fn parse_blocks(source: &str) -> Vec<Node> {
    let mut scanner = BlockScanner::new(source);
    for (event, range) in Parser::new_ext(source, parser_options()).into_offset_iter() {
        scanner.event(event, range);
    }
    scanner.finish()
}

/// How a top-level block is turned into a node.
#[derive(Debug, Clone, Copy)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    Code,
    Verbatim,
    Compound,
}

impl BlockKind {
    fn of(tag: &Tag<'_>) -> Self {
        match tag {
            Tag::Heading { level, .. } => Self::Heading(heading_depth(*level)),
            Tag::Paragraph => Self::Paragraph,
            Tag::CodeBlock(_) => Self::Code,
            Tag::HtmlBlock => Self::Verbatim,
            _ => Self::Compound,
        }
    }
}

/// Inline content of a heading or paragraph.
#[derive(Debug)]
struct Content {
    /// Heading depth, `None` for paragraphs.
    depth: Option<u8>,
    /// Source range from the first to the last inline event.
    range: Option<Range<usize>>,
    /// Where an empty heading sits in the source.
    anchor: usize,
    /// Opened by inline events outside any paragraph (tight list items,
    /// table cells).
    implicit: bool,
}

impl Content {
    fn extend(&mut self, range: Range<usize>) {
        self.range = Some(match self.range.take() {
            Some(current) => current.start.min(range.start)..current.end.max(range.end),
            None => range,
        });
    }
}

struct BlockScanner<'a> {
    source: &'a str,
    blocks: Vec<Node>,
    /// End of the last emitted top-level block.
    emitted: usize,
    depth: usize,
    top: Option<(BlockKind, usize)>,
    /// Nesting of code and HTML blocks, whose events are never content.
    verbatim: usize,
    open: Option<Content>,
    contents: Vec<Content>,
}

impl<'a> BlockScanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            blocks: Vec::new(),
            emitted: 0,
            depth: 0,
            top: None,
            verbatim: 0,
            open: None,
            contents: Vec::new(),
        }
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) if is_inline_tag(&tag) => self.inline(range),
            Event::End(tag) if is_inline_tag_end(tag) => self.inline(range),
            Event::Start(tag) => self.start(&tag, range),
            Event::End(tag) => self.end(tag, range),
            Event::Text(_)
            | Event::Code(_)
            | Event::InlineHtml(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_)
            | Event::FootnoteReference(_)
            | Event::SoftBreak
            | Event::HardBreak => self.inline(range),
            Event::Rule => {
                self.close_implicit();
                if self.depth == 0 {
                    self.emit(BlockKind::Verbatim, range);
                }
            }
            _ => self.close_implicit(),
        }
    }

    fn start(&mut self, tag: &Tag<'_>, range: Range<usize>) {
        self.close_implicit();
        if self.depth == 0 {
            self.top = Some((BlockKind::of(tag), range.start));
        }
        self.depth += 1;

        match tag {
            Tag::Heading { level, .. } => {
                self.open = Some(Content {
                    depth: Some(heading_depth(*level)),
                    range: None,
                    anchor: range.end,
                    implicit: false,
                });
            }
            Tag::Paragraph => {
                self.open = Some(Content {
                    depth: None,
                    range: None,
                    anchor: range.end,
                    implicit: false,
                });
            }
            Tag::CodeBlock(_) | Tag::HtmlBlock => self.verbatim += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd, range: Range<usize>) {
        match tag {
            TagEnd::Heading(_) | TagEnd::Paragraph => {
                if let Some(content) = self.open.take() {
                    self.contents.push(content);
                }
            }
            TagEnd::CodeBlock | TagEnd::HtmlBlock => {
                self.verbatim = self.verbatim.saturating_sub(1);
            }
            _ => self.close_implicit(),
        }

        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0
            && let Some((kind, start)) = self.top.take()
        {
            self.emit(kind, start..range.end);
        }
    }

    fn inline(&mut self, range: Range<usize>) {
        if self.verbatim > 0 {
            return;
        }
        let content = self.open.get_or_insert_with(|| Content {
            depth: None,
            range: None,
            anchor: range.start,
            implicit: true,
        });
        content.extend(range);
    }

    fn close_implicit(&mut self) {
        if self.open.as_ref().is_some_and(|content| content.implicit)
            && let Some(content) = self.open.take()
        {
            self.contents.push(content);
        }
    }

    fn emit(&mut self, kind: BlockKind, range: Range<usize>) {
        let start = line_start(self.source, range.start).max(self.emitted);
        self.push_gap(start);

        let end = start + self.source[start..range.end].trim_end().len();
        let contents = std::mem::take(&mut self.contents);

        let node = match kind {
            BlockKind::Heading(depth) => Node::heading(depth, self.first_inline(&contents)),
            BlockKind::Paragraph => Node::paragraph(self.first_inline(&contents)),
            BlockKind::Code => Node::code(&self.source[start..end]),
            BlockKind::Verbatim => Node::markup(&self.source[start..end]),
            BlockKind::Compound => Node::block(self.compound(start..end, contents)),
        };
        self.blocks.push(node);
        self.emitted = range.end;
    }

    /// Keep source that produced no events (link reference definitions).
    fn push_gap(&mut self, until: usize) {
        let gap = self.source[self.emitted..until]
            .trim_start_matches(['\n', '\r'])
            .trim_end();
        if !gap.is_empty() {
            self.blocks.push(Node::markup(gap));
        }
    }

    fn first_inline(&self, contents: &[Content]) -> Vec<Node> {
        contents
            .first()
            .and_then(|content| content.range.clone())
            .map(|range| parse_inline(&self.source[self.escaped_start(range.start)..range.end]))
            .unwrap_or_default()
    }

    /// Split a compound block into verbatim markup around its contents.
    fn compound(&self, block: Range<usize>, contents: Vec<Content>) -> Vec<Node> {
        let mut children = Vec::new();
        let mut pos = block.start;

        for content in contents {
            let range = match content.range {
                Some(range) => {
                    let start = self.escaped_start(range.start).clamp(pos, block.end);
                    start..range.end.clamp(start, block.end)
                }
                None => {
                    let anchor = content.anchor.clamp(pos, block.end);
                    anchor..anchor
                }
            };

            if range.start > pos {
                children.push(Node::markup(&self.source[pos..range.start]));
            }
            let inline = if range.is_empty() {
                Vec::new()
            } else {
                parse_inline(&self.source[range.clone()])
            };
            children.push(match content.depth {
                Some(depth) => Node::heading(depth, inline),
                None => Node::paragraph(inline),
            });
            pos = range.end;
        }

        if block.end > pos {
            children.push(Node::markup(&self.source[pos..block.end]));
        }
        children
    }

    /// Include the backslash of an escape that opens the content.
    fn escaped_start(&self, start: usize) -> usize {
        if start > 0 && self.source.as_bytes()[start - 1] == b'\\' {
            start - 1
        } else {
            start
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.push_gap(self.source.len());
        self.blocks
    }
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_tag_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn line_start(source: &str, at: usize) -> usize {
    source[..at].rfind('\n').map_or(0, |idx| idx + 1)
}
