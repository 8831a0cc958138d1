//! Markdown to block tree.
//!
//! The extraction engine only needs block structure (lists, items,
//! paragraphs, headings) plus byte spans to recover the author's exact
//! source text, so the tree stores nothing else.

mod builder;
pub mod span;
pub mod tree;

pub use span::Span;
pub use tree::{Descendants, DocTree, Node, NodeId, NodeKind};

/// Parse markdown source into a [`DocTree`].
pub fn parse_document(source: &str) -> DocTree {
    DocTree::parse(source)
}
