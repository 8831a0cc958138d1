use crate::models::BlogPost;
use crate::parsing::{DocTree, NodeId, NodeKind};

use super::{MARKER, MetadataParser, text};

/// Traversal state for one walk of the top-level strategy.
#[derive(Default)]
struct TopLevelWalk {
    property_lines: Vec<String>,
    content: Vec<String>,
    marked: bool,
}

/// Extract a post written as page properties: free-standing `key:: value`
/// paragraphs (one of them the marker) followed by top-level lists whose
/// items are the content blocks. Yields at most one post.
pub fn extract(tree: &DocTree, source: &str) -> Vec<BlogPost> {
    let mut walk = TopLevelWalk::default();
    for id in tree.descendants(tree.root()) {
        walk.visit(tree, id, source);
    }
    walk.finish().into_iter().collect()
}

impl TopLevelWalk {
    fn visit(&mut self, tree: &DocTree, id: NodeId, source: &str) {
        match tree.kind(id) {
            NodeKind::Paragraph if !tree.has_ancestor(id, NodeKind::ListItem) => {
                for line in tree.lines(id, source) {
                    if !line.contains("::") {
                        continue;
                    }
                    if line.contains(MARKER) {
                        self.marked = true;
                    }
                    self.property_lines.push(line.to_string());
                }
            }
            NodeKind::List if self.marked => {
                let nested = tree
                    .parent(id)
                    .is_some_and(|parent| tree.kind(parent) == NodeKind::ListItem);
                if !nested {
                    self.content.extend(
                        tree.children(id)
                            .iter()
                            .map(|item| text::reconstruct(tree, *item, source)),
                    );
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<BlogPost> {
        if !self.marked {
            return None;
        }
        let meta = MetadataParser.parse(&self.property_lines);
        Some(BlogPost::new(meta, self.content))
    }
}
