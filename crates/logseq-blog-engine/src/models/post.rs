use serde::Serialize;

/// Metadata fields recognized on a post. Absent fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub date: String,
    pub title: String,
    pub author: String,
    /// Asset path of the header image, already pulled out of `![alt](path)`.
    pub header: String,
    pub status: String,
    pub language: String,
    /// Derived from the first content block, never read from the source.
    pub summary: String,
}

/// One post extracted from a document: metadata plus ordered content blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub meta: PostMetadata,
    pub content: Vec<String>,
}

impl BlogPost {
    /// Build a post and derive its summary from the first content block.
    pub fn new(meta: PostMetadata, content: Vec<String>) -> Self {
        let mut post = Self { meta, content };
        if post.meta.summary.is_empty()
            && let Some(first) = post.content.first()
        {
            post.meta.summary = first.replace('\n', " ");
        }
        post
    }

    /// Markdown body: trimmed, non-empty blocks separated by a blank line.
    pub fn body(&self) -> String {
        self.content
            .iter()
            .map(|block| block.trim())
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
