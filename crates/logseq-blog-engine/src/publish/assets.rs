use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use relative_path::RelativePath;

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "wmv", "flv", "webm", "mkv", "m4v", "mpg", "mpeg",
];

/// Outcome of copying the assets a post references.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub copied: Vec<PathBuf>,
    /// Sources that could not be copied. Reported, never fatal.
    pub missing: Vec<PathBuf>,
}

/// Copies images and videos referenced from `assets/` next to the post and
/// rewrites the references to the local file names.
pub struct AssetProcessor {
    input_dir: PathBuf,
    output_dir: PathBuf,
    report: AssetReport,
}

impl AssetProcessor {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            report: AssetReport::default(),
        }
    }

    /// Copy every `![alt](…assets/file)` target and return the content with
    /// references rewritten; videos become Hugo `video` shortcodes.
    pub fn process_content(&mut self, content: &str) -> String {
        asset_regex()
            .replace_all(content, |caps: &Captures<'_>| {
                let alt = &caps[1];
                let file = &caps[3];
                let source = format!("{}{}", &caps[2], file);
                self.copy(&source, file);

                if is_video(file) {
                    format!(r#"{{{{< video src="{file}" >}}}}"#)
                } else {
                    format!("![{alt}]({file})")
                }
            })
            .into_owned()
    }

    /// Copy the header image to `featured.<ext>`.
    pub fn process_header(&mut self, header: &str) {
        if header.is_empty() {
            return;
        }
        let target = match Path::new(header).extension() {
            Some(ext) => format!("featured.{}", ext.to_string_lossy()),
            None => "featured".to_string(),
        };
        self.copy(header, &target);
    }

    pub fn finish(self) -> AssetReport {
        self.report
    }

    fn copy(&mut self, relative_source: &str, target: &str) {
        let src = RelativePath::new(relative_source).to_logical_path(&self.input_dir);
        let dst = self.output_dir.join(target);

        match fs::copy(&src, &dst) {
            Ok(_) => {
                log::debug!("copied {} -> {}", src.display(), dst.display());
                self.report.copied.push(dst);
            }
            Err(e) => {
                log::warn!("Missing asset {}: {e}", src.display());
                self.report.missing.push(src);
            }
        }
    }
}

fn is_video(file: &str) -> bool {
    Path::new(file)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

fn asset_regex() -> &'static Regex {
    static ASSET_REGEX: OnceLock<Regex> = OnceLock::new();
    ASSET_REGEX.get_or_init(|| {
        Regex::new(r"!\[([^\]]*)\]\(([^)]*?assets/)([^)]*)\)").expect("Invalid asset regex")
    })
}
