use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::span::Span;
use super::tree::{DocTree, Node, NodeId, NodeKind};

/// An open node on the builder stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    /// Paragraph synthesized for inline content sitting directly in a tight
    /// list item; closed by the next block event instead of an explicit end.
    implicit: bool,
}

/// Builds a [`DocTree`] from the pulldown-cmark offset event stream.
///
/// # Event flow for lists
///
/// ```markdown
/// - Parent
///   - Child
/// ```
/// yields `Start(List) Start(Item) Text("Parent") Start(List) Start(Item)
/// Text("Child") End(Item) End(List) End(Item) End(List)`: nested lists
/// arrive inside their parent item, after the parent's own text. Tight items
/// carry no `Paragraph` events at all, so the builder wraps that leading
/// inline run in an implicit paragraph to give every item block children.
pub(crate) struct TreeBuilder<'s> {
    source: &'s str,
    nodes: Vec<Node>,
    stack: Vec<Frame>,
    indents: Vec<usize>,
}

impl<'s> TreeBuilder<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        let root = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
            span: Span {
                start: 0,
                end: source.len(),
            },
            content: None,
            indent: 0,
        };
        Self {
            source,
            nodes: vec![root],
            stack: vec![Frame {
                id: NodeId(0),
                implicit: false,
            }],
            indents: Vec::new(),
        }
    }

    pub(crate) fn build(mut self) -> DocTree {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let source = self.source;
        for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
            self.push(event, Span::from(range));
        }
        DocTree { nodes: self.nodes }
    }

    fn push(&mut self, event: Event<'_>, span: Span) {
        match event {
            Event::Start(tag) => match block_kind(&tag) {
                Some(kind) => self.open_block(kind, span),
                None => self.extend_inline(span),
            },
            Event::End(tag) => {
                if is_block_end(&tag) {
                    self.close_implicit();
                    self.close_block();
                } else {
                    self.extend_inline(span);
                }
            }
            Event::Rule => {
                self.close_implicit();
                self.add_node(NodeKind::Other, span);
            }
            // Raw HTML lines inside an HTML block belong to that block.
            Event::Html(_) => {}
            _ => self.extend_inline(span),
        }
    }

    fn open_block(&mut self, kind: NodeKind, span: Span) {
        self.close_implicit();
        let id = self.add_node(kind, span);
        self.stack.push(Frame {
            id,
            implicit: false,
        });
        if kind == NodeKind::ListItem {
            self.indents
                .push(item_content_column(self.source, span.start));
        }
    }

    fn close_block(&mut self) {
        // The root frame is never popped, even on unbalanced input.
        if self.stack.len() > 1
            && let Some(frame) = self.stack.pop()
            && self.nodes[frame.id.0].kind == NodeKind::ListItem
        {
            self.indents.pop();
        }
    }

    fn close_implicit(&mut self) {
        if self.stack.last().is_some_and(|frame| frame.implicit) {
            self.stack.pop();
        }
    }

    fn extend_inline(&mut self, span: Span) {
        let Some(top) = self.stack.last().copied() else {
            return;
        };
        let target = match self.nodes[top.id.0].kind {
            NodeKind::Paragraph | NodeKind::Heading { .. } => top.id,
            NodeKind::ListItem => {
                let id = self.add_node(NodeKind::Paragraph, span);
                self.stack.push(Frame { id, implicit: true });
                id
            }
            // Inline runs inside code, tables and quotes stay part of that block.
            _ => return,
        };

        let implicit = self.stack.last().is_some_and(|frame| frame.implicit);
        let node = &mut self.nodes[target.0];
        let content = match node.content {
            Some(existing) => existing.cover(span),
            None => span,
        };
        node.content = Some(content);
        if implicit {
            node.span = content;
        }
    }

    fn add_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.stack.last().map(|frame| frame.id);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
            span,
            content: None,
            indent: self.indents.last().copied().unwrap_or(0),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }
}

fn block_kind(tag: &Tag<'_>) -> Option<NodeKind> {
    match tag {
        Tag::List(_) => Some(NodeKind::List),
        Tag::Item => Some(NodeKind::ListItem),
        Tag::Paragraph => Some(NodeKind::Paragraph),
        Tag::Heading { level, .. } => Some(NodeKind::Heading {
            level: *level as u8,
        }),
        Tag::BlockQuote(_)
        | Tag::CodeBlock(_)
        | Tag::HtmlBlock
        | Tag::FootnoteDefinition(_)
        | Tag::DefinitionList
        | Tag::DefinitionListTitle
        | Tag::DefinitionListDefinition
        | Tag::Table(_)
        | Tag::TableHead
        | Tag::TableRow
        | Tag::TableCell
        | Tag::MetadataBlock(_) => Some(NodeKind::Other),
        _ => None,
    }
}

fn is_block_end(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::MetadataBlock(_)
    )
}

/// Column where the content of the list item starting at `start` begins:
/// leading whitespace, the bullet or ordinal marker, then up to four columns
/// of padding.
fn item_content_column(source: &str, start: usize) -> usize {
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let bytes = source.as_bytes();
    let mut column = bytes[line_start..start]
        .iter()
        .fold(0, |column, b| next_column(column, *b));
    let mut pos = start;

    while let Some(&b @ (b' ' | b'\t')) = bytes.get(pos) {
        column = next_column(column, b);
        pos += 1;
    }
    match bytes.get(pos) {
        Some(b'-' | b'*' | b'+') => {
            pos += 1;
            column += 1;
        }
        Some(b'0'..=b'9') => {
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
                column += 1;
            }
            if matches!(bytes.get(pos), Some(b'.' | b')')) {
                pos += 1;
                column += 1;
            }
        }
        _ => {}
    }

    let mut padded = column;
    while let Some(&b @ (b' ' | b'\t')) = bytes.get(pos) {
        padded = next_column(padded, b);
        pos += 1;
    }
    // Five or more columns mean indented code: content starts one past the marker.
    if padded - column > 4 { column + 1 } else { padded }
}

/// Column after `byte`, with tabs stopping at multiples of four.
pub(crate) fn next_column(column: usize, byte: u8) -> usize {
    if byte == b'\t' {
        column + 4 - column % 4
    } else {
        column + 1
    }
}
