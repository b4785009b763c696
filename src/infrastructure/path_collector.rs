use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::language::Language;
use crate::error::{Result, ScanError};

/// Collect every regular file under `root` whose extension matches `language`.
///
/// Hidden files and directories are included. Entries are visited in file-name order
/// within each directory, and symlinks are not followed. Any unreadable entry aborts
/// the walk: a partial path list is never returned.
pub fn collect_paths(root: &Path, language: Language) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && language.matches_path(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = paths.len(), "collected paths");
    Ok(paths)
}
