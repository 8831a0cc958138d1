use super::builder::{TreeBuilder, next_column};
use super::span::Span;

/// Stable index of a node inside a [`DocTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The block-level kinds the extraction engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    List,
    ListItem,
    Paragraph,
    Heading { level: u8 },
    /// Code blocks, block quotes, HTML blocks, tables, rules.
    Other,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Full byte span of the block.
    pub span: Span,
    /// Extent of the inline content (paragraphs and headings only).
    pub content: Option<Span>,
    /// Content column of the innermost enclosing list item, stripped from
    /// continuation lines.
    pub indent: usize,
}

/// Read-only block tree of one markdown document.
///
/// Nodes never own text; [`DocTree::lines`] and [`DocTree::text`] resolve
/// spans against the source the tree was parsed from.
#[derive(Debug, Clone)]
pub struct DocTree {
    pub(crate) nodes: Vec<Node>,
}

impl DocTree {
    /// Parse `source` into a tree. Never fails: any text is some document.
    pub fn parse(source: &str) -> Self {
        TreeBuilder::new(source).build()
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// True if any ancestor of `id` has the given kind.
    pub fn has_ancestor(&self, id: NodeId, kind: NodeKind) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if self.kind(p) == kind {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Pre-order walk of the subtree rooted at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Source lines of a node with list indentation removed.
    ///
    /// Paragraphs and headings yield their inline content only, so heading
    /// markers never show up here.
    pub fn lines<'s>(&self, id: NodeId, source: &'s str) -> Vec<&'s str> {
        let node = self.node(id);
        let span = match node.kind {
            NodeKind::Paragraph | NodeKind::Heading { .. } => match node.content {
                Some(content) => content,
                None => return Vec::new(),
            },
            _ => node.span,
        };

        let raw = span.slice(source).trim_end_matches(['\n', '\r']);
        if raw.is_empty() {
            return Vec::new();
        }

        let at_line_start =
            span.start == 0 || source.as_bytes().get(span.start - 1) == Some(&b'\n');
        raw.split('\n')
            .enumerate()
            .map(|(i, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if i == 0 && !at_line_start {
                    line
                } else {
                    strip_indent(line, node.indent)
                }
            })
            .collect()
    }

    /// Raw text of a node: leaf lines joined by newlines, containers as the
    /// newline-joined text of their children.
    pub fn text(&self, id: NodeId, source: &str) -> String {
        self.collect_text(id, source, true)
    }

    /// Like [`DocTree::text`] but skipping nested lists, i.e. the text an
    /// item carries itself.
    pub fn own_text(&self, id: NodeId, source: &str) -> String {
        self.collect_text(id, source, false)
    }

    fn collect_text(&self, id: NodeId, source: &str, include_lists: bool) -> String {
        match self.kind(id) {
            NodeKind::Paragraph | NodeKind::Heading { .. } | NodeKind::Other => {
                self.lines(id, source).join("\n")
            }
            NodeKind::Document | NodeKind::List | NodeKind::ListItem => self
                .children(id)
                .iter()
                .filter(|child| include_lists || self.kind(**child) != NodeKind::List)
                .map(|child| self.collect_text(*child, source, include_lists))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Remove leading whitespace up to `indent` columns.
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut column = 0;
    for (i, b) in line.bytes().enumerate() {
        if column >= indent || !matches!(b, b' ' | b'\t') {
            return &line[i..];
        }
        column = next_column(column, b);
    }
    ""
}

/// Iterator returned by [`DocTree::descendants`].
pub struct Descendants<'t> {
    tree: &'t DocTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
