//! Shared helpers for unit tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Create an empty temporary directory standing in for a notes graph
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Create a file (and its parent directories) inside the test directory
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
