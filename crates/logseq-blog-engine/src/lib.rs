pub mod extraction;
pub mod io;
pub mod models;
pub mod parsing;
pub mod publish;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use extraction::{MARKER, MetadataParser, STRATEGIES, Strategy, extract_posts};
pub use io::*;
pub use models::{BlogPost, PostMetadata};
pub use parsing::{DocTree, NodeId, NodeKind, parse_document};
pub use publish::{BatchReport, ConversionReport, Converter, PublishError};
