//! Publishing extracted posts as Hugo page bundles.
//!
//! A [`Converter`] reads one notes file, extracts its posts, filters them by
//! status and writes each kept post into `<output>/<date>_<title>/` together
//! with the assets it references.

pub mod assets;
pub mod hugo;

use std::fs;
use std::path::{Path, PathBuf};

use crate::extraction::extract_posts;
use crate::io::{self, IoError};
use crate::models::{BlogPost, PostMetadata};
use crate::parsing::parse_document;

pub use assets::{AssetProcessor, AssetReport};
pub use hugo::{HugoWriter, index_filename};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("No blog post found in {}", .0.display())]
    NoPostFound(PathBuf),
    #[error("Failed to render front matter: {0}")]
    FrontMatter(#[from] toml::ser::Error),
}

/// A post that made it to disk (or would have, on a dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPost {
    pub title: String,
    pub path: PathBuf,
    pub assets: AssetReport,
}

/// A post left out because of its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPost {
    pub title: String,
    pub status: String,
}

/// A post that could not be written. Other posts of the file still are.
#[derive(Debug)]
pub struct FailedPost {
    pub title: String,
    pub error: PublishError,
}

#[derive(Debug, Default)]
pub struct ConversionReport {
    pub written: Vec<WrittenPost>,
    pub skipped: Vec<SkippedPost>,
    pub failed: Vec<FailedPost>,
}

/// Result of converting every markdown file below a directory.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<(PathBuf, ConversionReport)>,
    /// Files that contained no post at all.
    pub empty: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, PublishError)>,
}

impl BatchReport {
    pub fn written_count(&self) -> usize {
        self.converted.iter().map(|(_, r)| r.written.len()).sum()
    }

    /// True if any file or any single post failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || self.converted.iter().any(|(_, r)| !r.failed.is_empty())
    }
}

pub struct Converter {
    output_root: PathBuf,
    publish_statuses: Vec<String>,
    include_drafts: bool,
    default_language: String,
    dry_run: bool,
}

impl Converter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            publish_statuses: vec!["online".to_string()],
            include_drafts: false,
            default_language: "de".to_string(),
            dry_run: false,
        }
    }

    pub fn with_publish_statuses(mut self, statuses: Vec<String>) -> Self {
        self.publish_statuses = statuses;
        self
    }

    /// Publish every post regardless of status.
    pub fn with_include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Extract and report without touching the output directory.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Convert one notes file. Fails with [`PublishError::NoPostFound`] when
    /// the file carries no post at all.
    pub fn convert_file(&self, path: &Path) -> Result<ConversionReport, PublishError> {
        let source = io::read_file(path)?;
        let tree = parse_document(&source);
        let posts = extract_posts(&tree, &source);
        if posts.is_empty() {
            return Err(PublishError::NoPostFound(path.to_path_buf()));
        }

        let input_dir = path.parent().unwrap_or(Path::new("."));
        let mut report = ConversionReport::default();
        for post in posts {
            if !self.is_publishable(&post.meta) {
                log::info!(
                    "Skipping '{}' with status '{}'",
                    post.meta.title,
                    post.meta.status
                );
                report.skipped.push(SkippedPost {
                    title: post.meta.title,
                    status: post.meta.status,
                });
                continue;
            }
            match self.publish(&post, input_dir) {
                Ok(written) => report.written.push(written),
                Err(error) => {
                    log::error!("Failed to write '{}': {error}", post.meta.title);
                    report.failed.push(FailedPost {
                        title: post.meta.title,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Convert every markdown file below `input_dir`. Files without posts
    /// are recorded and skipped; other errors do not stop the batch.
    pub fn convert_dir(&self, input_dir: &Path) -> Result<BatchReport, PublishError> {
        let mut batch = BatchReport::default();
        for file in io::scan_markdown_files(input_dir)? {
            match self.convert_file(&file) {
                Ok(report) => batch.converted.push((file, report)),
                Err(PublishError::NoPostFound(path)) => {
                    log::debug!("No post in {}", path.display());
                    batch.empty.push(path);
                }
                Err(e) => {
                    log::error!("Failed to convert {}: {e}", file.display());
                    batch.failures.push((file, e));
                }
            }
        }
        Ok(batch)
    }

    fn is_publishable(&self, meta: &PostMetadata) -> bool {
        self.include_drafts
            || self
                .publish_statuses
                .iter()
                .any(|status| status.trim().eq_ignore_ascii_case(meta.status.trim()))
    }

    fn publish(&self, post: &BlogPost, input_dir: &Path) -> Result<WrittenPost, PublishError> {
        let out_dir = self.output_root.join(output_dir_name(&post.meta));

        if self.dry_run {
            let path = out_dir.join(index_filename(&post.meta.language, &self.default_language));
            log::info!("Would write '{}' to {}", post.meta.title, path.display());
            return Ok(WrittenPost {
                title: post.meta.title.clone(),
                path,
                assets: AssetReport::default(),
            });
        }

        fs::create_dir_all(&out_dir).map_err(IoError::from)?;
        let mut assets = AssetProcessor::new(input_dir, &out_dir);
        assets.process_header(&post.meta.header);
        let content = assets.process_content(&post.body());
        let assets = assets.finish();

        let path = HugoWriter::new(&out_dir, &self.default_language).write(&post.meta, &content)?;
        log::info!("Wrote '{}' to {}", post.meta.title, path.display());
        Ok(WrittenPost {
            title: post.meta.title.clone(),
            path,
            assets,
        })
    }
}

/// Directory name of a post bundle: `<date>_<title>` with spaces and path
/// separators replaced by underscores.
pub fn output_dir_name(meta: &PostMetadata) -> String {
    let title: String = meta
        .title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{}_{}", meta.date.trim(), title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};
    use pretty_assertions::assert_eq;

    const JOURNAL: &str = "\
- [[Blog]]
  - type:: blog
    date:: 2026-01-17
    title:: Spring plans
    author:: Anna
    status:: online
    header:: ![head](../assets/head.jpg)
  - First we plant.
  - ![beds](../assets/beds.png)
- [[Blog]]
  - type:: blog
    date:: 2026-01-18
    title:: Half done
    status:: draft
  - Not yet.
";

    #[test]
    fn output_dir_name_joins_date_and_title() {
        let meta = PostMetadata {
            date: "2026-01-17".into(),
            title: "Spring plans / part 1".into(),
            ..PostMetadata::default()
        };
        assert_eq!(output_dir_name(&meta), "2026-01-17_Spring_plans___part_1");
    }

    #[test]
    fn convert_writes_online_posts_and_skips_drafts() {
        // Given a journal with one online and one draft post
        let graph = create_test_dir();
        create_test_file(&graph, "assets/head.jpg", "jpg");
        create_test_file(&graph, "assets/beds.png", "png");
        let journal = create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        let out = create_test_dir();

        // When converted with default settings
        let report = Converter::new(out.path()).convert_file(&journal).unwrap();

        // Then only the online post is written with its assets
        assert_eq!(report.written.len(), 1);
        assert_eq!(
            report.skipped,
            vec![SkippedPost {
                title: "Half done".into(),
                status: "draft".into()
            }]
        );
        let bundle = out.path().join("2026-01-17_Spring_plans");
        let page = std::fs::read_to_string(bundle.join("index.de.md")).unwrap();
        assert!(page.contains("title = \"Spring plans\""));
        assert!(page.ends_with("First we plant.\n\n![beds](beds.png)\n"));
        assert!(bundle.join("featured.jpg").exists());
        assert!(bundle.join("beds.png").exists());
        assert!(report.written[0].assets.missing.is_empty());
    }

    #[test]
    fn include_drafts_publishes_everything() {
        let graph = create_test_dir();
        let journal = create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        let out = create_test_dir();

        let report = Converter::new(out.path())
            .with_include_drafts(true)
            .convert_file(&journal)
            .unwrap();

        assert_eq!(report.written.len(), 2);
        assert!(report.skipped.is_empty());
        // Assets are absent from this graph: reported, not fatal.
        assert_eq!(report.written[0].assets.missing.len(), 2);
    }

    #[test]
    fn failing_post_does_not_stop_the_others() {
        // Given a plain file blocking the first post's bundle directory
        let graph = create_test_dir();
        let journal = create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        let out = create_test_dir();
        create_test_file(&out, "2026-01-17_Spring_plans", "in the way");

        // When both posts are published
        let report = Converter::new(out.path())
            .with_include_drafts(true)
            .convert_file(&journal)
            .unwrap();

        // Then the first is reported failed and the second still written
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].title, "Spring plans");
        assert!(matches!(report.failed[0].error, PublishError::Io(_)));
        assert_eq!(report.written.len(), 1);
        assert!(
            out.path()
                .join("2026-01-17_Half_done")
                .join("index.de.md")
                .exists()
        );
    }

    #[test]
    fn custom_statuses_are_case_insensitive() {
        let graph = create_test_dir();
        let journal = create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        let out = create_test_dir();

        let report = Converter::new(out.path())
            .with_publish_statuses(vec!["Draft".into()])
            .convert_file(&journal)
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.written[0].title, "Half done");
    }

    #[test]
    fn dry_run_writes_nothing() {
        let graph = create_test_dir();
        let journal = create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        let out = create_test_dir();

        let report = Converter::new(out.path())
            .with_dry_run(true)
            .convert_file(&journal)
            .unwrap();

        assert_eq!(
            report.written[0].path,
            out.path().join("2026-01-17_Spring_plans").join("index.de.md")
        );
        assert!(!out.path().join("2026-01-17_Spring_plans").exists());
    }

    #[test]
    fn file_without_post_is_an_error() {
        let graph = create_test_dir();
        let page = create_test_file(&graph, "pages/todo.md", "- buy milk\n");
        let out = create_test_dir();

        let err = Converter::new(out.path()).convert_file(&page).unwrap_err();

        assert!(matches!(err, PublishError::NoPostFound(path) if path == page));
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let out = create_test_dir();
        let err = Converter::new(out.path())
            .convert_file(&out.path().join("nope.md"))
            .unwrap_err();
        assert!(matches!(err, PublishError::Io(IoError::NotFound(_))));
    }

    #[test]
    fn convert_dir_separates_empty_files() {
        // Given a graph with one post file and one plain page
        let graph = create_test_dir();
        create_test_file(&graph, "journals/2026_01_17.md", JOURNAL);
        create_test_file(&graph, "pages/todo.md", "- buy milk\n");
        let out = create_test_dir();

        // When the whole graph is converted
        let batch = Converter::new(out.path()).convert_dir(graph.path()).unwrap();

        // Then the plain page is recorded as empty, not failed
        assert_eq!(batch.written_count(), 1);
        assert_eq!(batch.empty, vec![graph.path().join("pages/todo.md")]);
        assert!(batch.failures.is_empty());
        assert!(!batch.has_failures());
    }
}
