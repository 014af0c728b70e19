use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary content root
pub fn create_test_content_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a lesson file under `<root>/<relative>`, making parent directories
pub fn create_test_file(content_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = content_dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
