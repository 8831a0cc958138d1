pub mod post;

pub use post::{BlogPost, PostMetadata};
