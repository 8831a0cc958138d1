use crate::parsing::{DocTree, NodeId, NodeKind};

/// Rebuild the markdown of one content item from its block children.
///
/// Headings are re-prefixed with `#` markers, nested lists are flattened to a
/// single level of `* ` bullets, and every other block is copied from the
/// source byte for byte so inline formatting survives untouched.
pub fn reconstruct(tree: &DocTree, item: NodeId, source: &str) -> String {
    let mut out = String::new();

    for &child in tree.children(item) {
        match tree.kind(child) {
            NodeKind::Heading { level } => {
                out.push_str(&"#".repeat(usize::from(level)));
                out.push(' ');
                out.push_str(&tree.text(child, source));
                out.push('\n');
            }
            NodeKind::List => {
                out.push('\n');
                let entries = tree
                    .descendants(child)
                    .filter(|id| tree.kind(*id) == NodeKind::ListItem);
                for entry in entries {
                    out.push_str("* ");
                    out.push_str(&tree.own_text(entry, source));
                    out.push('\n');
                }
            }
            _ => {
                for line in tree.lines(child, source) {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }

    out.trim().to_string()
}
