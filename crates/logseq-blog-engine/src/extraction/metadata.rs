use std::sync::OnceLock;

use regex::Regex;

use crate::models::PostMetadata;

/// Parses `key:: value` property lines into [`PostMetadata`].
///
/// Stateless: the patterns are compiled once per process and shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataParser;

impl MetadataParser {
    /// Parse property lines. Lines that are not properties, and properties
    /// with unknown keys, are ignored.
    pub fn parse<I, S>(&self, lines: I) -> PostMetadata
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut meta = PostMetadata::default();
        for line in lines {
            if let Some(captures) = property_regex().captures(line.as_ref()) {
                let key = &captures[1];
                let value = captures[2].trim();
                set_field(&mut meta, key, value);
            }
        }
        meta
    }
}

fn set_field(meta: &mut PostMetadata, key: &str, value: &str) {
    match key {
        "date" => meta.date = value.to_string(),
        "title" => meta.title = value.to_string(),
        "author" => meta.author = value.to_string(),
        "header" => meta.header = image_path(value).to_string(),
        "status" => meta.status = value.to_string(),
        "language" => meta.language = value.to_string(),
        _ => {}
    }
}

/// Path inside the first `(...)` of a markdown image reference, or the raw
/// value when there are no parentheses.
pub fn image_path(raw: &str) -> &str {
    match image_path_regex().captures(raw).and_then(|c| c.get(1)) {
        Some(path) => path.as_str(),
        None => raw,
    }
}

fn property_regex() -> &'static Regex {
    static PROPERTY_REGEX: OnceLock<Regex> = OnceLock::new();
    PROPERTY_REGEX.get_or_init(|| Regex::new(r"(\w+)::\s*(.*)").expect("Invalid property regex"))
}

fn image_path_regex() -> &'static Regex {
    static IMAGE_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_PATH_REGEX.get_or_init(|| Regex::new(r"\((.*?)\)").expect("Invalid image path regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_fields() {
        let meta = MetadataParser.parse([
            "type:: blog",
            "date:: 2026-01-17",
            "title:: Frühlingspläne 2026",
            "author:: Anna",
            "status:: online",
            "language:: german",
        ]);

        assert_eq!(
            meta,
            PostMetadata {
                date: "2026-01-17".into(),
                title: "Frühlingspläne 2026".into(),
                author: "Anna".into(),
                header: String::new(),
                status: "online".into(),
                language: "german".into(),
                summary: String::new(),
            }
        );
    }

    #[test]
    fn header_keeps_only_the_image_path() {
        let meta = MetadataParser.parse(["header:: ![cover.jpeg](../assets/cover_1.jpeg)"]);
        assert_eq!(meta.header, "../assets/cover_1.jpeg");
    }

    #[test]
    fn header_without_parentheses_is_verbatim() {
        let meta = MetadataParser.parse(["header:: assets/cover.jpeg"]);
        assert_eq!(meta.header, "assets/cover.jpeg");
    }

    #[test]
    fn unknown_and_malformed_lines_are_ignored() {
        let meta = MetadataParser.parse([
            "tags:: travel, spring",
            "summary:: not taken from input",
            "just prose",
            "title: single colon",
            "",
        ]);
        assert_eq!(meta, PostMetadata::default());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let meta = MetadataParser.parse(["Title:: Loud", "TITLE:: Louder"]);
        assert_eq!(meta.title, "");
    }

    #[test]
    fn value_is_trimmed_and_may_be_empty() {
        let meta = MetadataParser.parse(["title::    Padded   ", "author::"]);
        assert_eq!(meta.title, "Padded");
        assert_eq!(meta.author, "");
    }

    #[test]
    fn later_lines_override_earlier_ones() {
        let meta = MetadataParser.parse(["status:: draft", "status:: online"]);
        assert_eq!(meta.status, "online");
    }
}
