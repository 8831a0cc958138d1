use std::collections::HashSet;

use crate::models::BlogPost;
use crate::parsing::{DocTree, NodeId, NodeKind};

use super::{MARKER, MetadataParser, text};

/// Traversal state for one walk of the nested-outline strategy.
struct OutlineWalk<'a> {
    tree: &'a DocTree,
    source: &'a str,
    processed: HashSet<NodeId>,
    posts: Vec<BlogPost>,
}

/// Extract every post written as a marked list: the first item holds the
/// properties (including the marker), each sibling item is a content block.
/// The marked list may sit under any number of wrapping outline levels.
pub fn extract(tree: &DocTree, source: &str) -> Vec<BlogPost> {
    OutlineWalk {
        tree,
        source,
        processed: HashSet::new(),
        posts: Vec::new(),
    }
    .run()
}

impl<'a> OutlineWalk<'a> {
    fn run(mut self) -> Vec<BlogPost> {
        let tree = self.tree;
        for id in tree.descendants(tree.root()) {
            if tree.kind(id) == NodeKind::List && !self.processed.contains(&id) {
                self.visit_list(id);
            }
        }
        self.posts
    }

    fn visit_list(&mut self, list: NodeId) {
        let Some(first) = self.tree.first_child(list) else {
            return;
        };
        if !self.tree.text(first, self.source).contains(MARKER) {
            return;
        }

        // An unresolvable shape is left alone; the walk reaches any marked
        // list inside it on its own.
        let Some(path) = self.resolve(list) else {
            return;
        };
        let Some(&resolved) = path.last() else {
            return;
        };
        if let Some(post) = self.extract_post(resolved) {
            self.posts.push(post);
        }

        // The wrapping levels and everything under the post are consumed; a
        // marked list elsewhere under a wrapper is still a post of its own.
        for &wrapper in &path {
            self.processed.insert(wrapper);
        }
        let tree = self.tree;
        self.processed.extend(
            tree.descendants(resolved)
                .filter(|id| tree.kind(*id) == NodeKind::List),
        );
    }

    /// Descend from a matched list to the list that actually carries the
    /// post, returning every list on the way (matched list first).
    ///
    /// A level whose first item holds the marker itself is the post. A level
    /// whose first item wraps exactly one nested list is a category and is
    /// stepped through. Any other shape does not resolve.
    fn resolve(&self, matched: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![matched];
        let mut current = matched;

        loop {
            let first = self.tree.first_child(current)?;
            if self.tree.own_text(first, self.source).contains(MARKER) {
                return Some(path);
            }

            let mut nested = self
                .tree
                .children(first)
                .iter()
                .copied()
                .filter(|id| self.tree.kind(*id) == NodeKind::List);
            match (nested.next(), nested.next()) {
                (Some(only), None) => {
                    path.push(only);
                    current = only;
                }
                _ => return None,
            }
        }
    }

    fn extract_post(&self, list: NodeId) -> Option<BlogPost> {
        let (first, rest) = self.tree.children(list).split_first()?;

        let properties = self.tree.own_text(*first, self.source);
        let meta = MetadataParser.parse(properties.lines());
        let content = rest
            .iter()
            .map(|item| text::reconstruct(self.tree, *item, self.source))
            .collect();

        Some(BlogPost::new(meta, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(source: &str) -> Vec<BlogPost> {
        let tree = DocTree::parse(source);
        extract(&tree, source)
    }

    #[test]
    fn flat_marked_list() {
        // Given a marked first item and one content sibling
        let source = "- type:: blog\n  date:: 2026-01-17\n  title:: Spring\n- Hello world\n";

        // When extracted
        let posts = run(source);

        // Then one post carries the properties and the sibling as content
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.date, "2026-01-17");
        assert_eq!(posts[0].meta.title, "Spring");
        assert_eq!(posts[0].meta.summary, "Hello world");
        assert_eq!(posts[0].content, vec!["Hello world"]);
    }

    #[rstest]
    #[case("Type:: blog")]
    #[case("type::blog")]
    #[case("type::  blog")]
    #[case("type: blog")]
    #[case("TYPE:: BLOG")]
    fn marker_variants_are_not_detected(#[case] marker: &str) {
        let source = format!("- {marker}\n  title:: Nope\n- Content\n");
        assert!(run(&source).is_empty());
    }

    #[test]
    fn marker_may_share_a_line_with_other_text() {
        let source = "- note type:: blog\n  title:: Inline\n- Body\n";
        let posts = run(source);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.title, "Inline");
    }

    #[test]
    fn category_wrappers_are_stepped_through() {
        // Given Category -> Subcategory -> Blog -> properties + content
        let source = "\
- Travel
  - Europe
    - [[Blog]]
      - type:: blog
        title:: Lisbon
        date:: 2025-05-01
      - First day
      - Second day
";

        // When extracted
        let posts = run(source);

        // Then exactly one post, with the innermost properties
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.title, "Lisbon");
        assert_eq!(posts[0].meta.date, "2025-05-01");
        assert_eq!(posts[0].content, vec!["First day", "Second day"]);
    }

    #[test]
    fn nested_content_lists_are_not_extra_posts() {
        let source = "\
- type:: blog
  title:: Outer
- Intro
  - type:: blog
    title:: Quoted example
  - more
- Outro
";
        let posts = run(source);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.title, "Outer");
        assert_eq!(posts[0].content.len(), 2);
        assert_eq!(
            posts[0].content[0],
            "Intro\n\n* type:: blog\ntitle:: Quoted example\n* more"
        );
    }

    #[test]
    fn independent_marked_lists_each_yield_a_post() {
        let source = "\
- type:: blog
  title:: First
- One

Some prose between.

- type:: blog
  title:: Second
- Two
";
        let posts = run(source);

        let titles: Vec<_> = posts.iter().map(|p| p.meta.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(posts[1].content, vec!["Two"]);
    }

    #[test]
    fn sibling_posts_under_one_category() {
        let source = "\
- Travel
  - [[Blog]]
    - type:: blog
      title:: North
    - Cold
  - [[Blog]]
    - type:: blog
      title:: South
    - Warm
";
        let posts = run(source);

        let titles: Vec<_> = posts.iter().map(|p| p.meta.title.as_str()).collect();
        assert_eq!(titles, vec!["North", "South"]);
        assert_eq!(posts[1].content, vec!["Warm"]);
    }

    #[test]
    fn ambiguous_wrapper_falls_through_to_inner_list() {
        // Descending through first items dead-ends at "unrelated"
        let source = "\
- Notes
  - unrelated
  - [[Blog]]
    - type:: blog
      title:: Found
    - Body
";
        let posts = run(source);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.title, "Found");
        assert_eq!(posts[0].content, vec!["Body"]);
    }

    #[test]
    fn properties_without_content_leave_summary_empty() {
        let posts = run("- type:: blog\n  title:: Lonely\n");
        assert_eq!(posts.len(), 1);
        assert!(posts[0].content.is_empty());
        assert_eq!(posts[0].meta.summary, "");
    }

    #[test]
    fn unmarked_document_yields_nothing() {
        assert!(run("- just\n- a list\n\nand text\n").is_empty());
        assert!(run("").is_empty());
    }
}
