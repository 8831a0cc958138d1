use std::path::PathBuf;

use serde::Serialize;

use crate::io;
use crate::models::PostMetadata;

use super::PublishError;

#[derive(Serialize)]
struct FrontMatter<'a> {
    date: &'a str,
    lastmod: &'a str,
    draft: bool,
    title: &'a str,
    summary: &'a str,
    params: Params<'a>,
}

#[derive(Serialize)]
struct Params<'a> {
    author: &'a str,
}

/// Writes a post as a Hugo page bundle index with TOML front matter.
pub struct HugoWriter {
    output_dir: PathBuf,
    default_language: String,
}

impl HugoWriter {
    pub fn new(output_dir: impl Into<PathBuf>, default_language: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            default_language: default_language.into(),
        }
    }

    /// Write `index.<lang>.md` and return its path.
    pub fn write(&self, meta: &PostMetadata, content: &str) -> Result<PathBuf, PublishError> {
        let path = self
            .output_dir
            .join(index_filename(&meta.language, &self.default_language));
        let page = render(meta, content)?;
        io::write_file(&path, &page)?;
        Ok(path)
    }
}

/// Front matter between `+++` fences, a blank line, then the content.
pub fn render(meta: &PostMetadata, content: &str) -> Result<String, toml::ser::Error> {
    let front = toml::to_string(&FrontMatter {
        date: &meta.date,
        lastmod: &meta.date,
        draft: false,
        title: &meta.title,
        summary: &meta.summary,
        params: Params {
            author: &meta.author,
        },
    })?;
    Ok(format!("+++\n{front}+++\n\n{content}\n"))
}

/// Page file name for a language tag, falling back to the default language.
pub fn index_filename(language: &str, default_language: &str) -> String {
    let code = language_code(language)
        .or_else(|| language_code(default_language))
        .unwrap_or("de");
    format!("index.{code}.md")
}

fn language_code(tag: &str) -> Option<&'static str> {
    match tag.trim().to_lowercase().as_str() {
        "german" | "deutsch" | "de" => Some("de"),
        "english" | "en" => Some("en"),
        _ => None,
    }
}
