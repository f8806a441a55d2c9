//! Input file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::ConvertError;

/// File name pattern for files picked up when no explicit list is given.
const HTML_PATTERN: &str = "*.html";

/// List `*.html` files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched, and the extension match is
/// case-sensitive. Symlinks are followed, so a link to a regular file is
/// picked up and a broken link is not.
pub fn discover_html_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let pattern = Pattern::new(HTML_PATTERN).expect("valid glob pattern");
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::Discover {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "Discovered HTML files");
    Ok(files)
}

/// Resolve explicitly named files against the base directory.
///
/// Absolute paths are kept as given.
pub fn resolve_inputs(base_dir: &Path, files: &[PathBuf]) -> Vec<PathBuf> {
    files.iter().map(|file| base_dir.join(file)).collect()
}
