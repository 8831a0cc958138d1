//! Post extraction from a parsed document.
//!
//! Two annotation conventions are recognized, each by its own strategy:
//!
//! - [`Strategy::NestedOutline`]: a list whose first item carries the
//!   properties, possibly wrapped in category levels (journal style).
//! - [`Strategy::TopLevel`]: page properties in free-standing paragraphs,
//!   content in the top-level lists that follow (page style).
//!
//! Both strategies always run. Their results are concatenated in the order
//! of [`STRATEGIES`]; a post whose title and date repeat a post from an
//! earlier strategy is dropped.

pub mod metadata;
pub mod outline;
pub mod text;
pub mod top_level;

use std::collections::HashSet;

use crate::models::BlogPost;
use crate::parsing::DocTree;

pub use metadata::MetadataParser;

/// The property line flagging a structure as a post. Matched as an exact,
/// case-sensitive substring.
pub const MARKER: &str = "type:: blog";

/// The closed set of extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    NestedOutline,
    TopLevel,
}

/// Strategies in the order their results are reported.
pub const STRATEGIES: [Strategy; 2] = [Strategy::NestedOutline, Strategy::TopLevel];

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::NestedOutline => "nested-outline",
            Strategy::TopLevel => "top-level",
        }
    }

    pub fn extract(self, tree: &DocTree, source: &str) -> Vec<BlogPost> {
        match self {
            Strategy::NestedOutline => outline::extract(tree, source),
            Strategy::TopLevel => top_level::extract(tree, source),
        }
    }
}

/// Run every strategy over one document and merge the results.
///
/// A post whose title and date repeat a post found by an earlier strategy is
/// dropped. Posts from the same strategy are always kept: one outline may
/// hold the same post once per language.
///
/// An empty result means the document holds no post; reporting that is up
/// to the caller.
pub fn extract_posts(tree: &DocTree, source: &str) -> Vec<BlogPost> {
    let mut posts = Vec::new();
    if tree.is_empty() {
        return posts;
    }
    let mut earlier = HashSet::new();

    for strategy in STRATEGIES {
        let found = strategy.extract(tree, source);
        log::debug!("{} strategy found {} post(s)", strategy.name(), found.len());

        let mut keys = Vec::new();
        for post in found {
            let key = (post.meta.title.clone(), post.meta.date.clone());
            let anonymous = key.0.is_empty() && key.1.is_empty();
            if !anonymous && earlier.contains(&key) {
                log::debug!(
                    "dropping duplicate post '{}' ({}) from {} strategy",
                    post.meta.title,
                    post.meta.date,
                    strategy.name()
                );
                continue;
            }
            if !anonymous {
                keys.push(key);
            }
            posts.push(post);
        }
        earlier.extend(keys);
    }

    posts
}
