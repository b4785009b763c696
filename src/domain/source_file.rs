// Source file metadata derived from a scanned path.

use std::path::{Path, PathBuf};

/// A scanned file and its derived, immutable attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Filename text before the first `.`.
    pub name: String,
    /// Name of the immediate parent directory.
    pub directory: String,
    pub lines: usize,
}

impl SourceFile {
    pub fn new(path: &Path, lines: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            name: symbolic_name(path),
            directory: directory_name(path),
            lines,
        }
    }
}

/// A file together with the qualifiers extracted from its content, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub file: SourceFile,
    pub references: Vec<String>,
}

/// Symbolic name of a file: its base name up to the first `.`.
pub fn symbolic_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    before_separator(&file_name, '.').to_string()
}

/// Last component of the file's parent directory, `.` for a bare file name.
pub fn directory_name(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent
            .components()
            .next_back()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string()),
        _ => ".".to_string(),
    }
}

/// Text before the first `separator`, or the whole input when it has none.
pub fn before_separator(input: &str, separator: char) -> &str {
    match input.find(separator) {
        Some(index) => &input[..index],
        None => input,
    }
}
