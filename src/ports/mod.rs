use std::path::Path;

use crate::api::dto::Snapshot;
use crate::domain::source_file::ScannedFile;
use crate::error::Result;

/// Turns one collected path into its metadata and extracted references.
/// Implementations are shared across worker threads.
pub trait ReferenceSource: Send + Sync {
    fn scan(&self, path: &Path) -> Result<ScannedFile>;
}

pub trait SnapshotExporter {
    fn export(&self, snapshot: &Snapshot, path: &Path) -> Result<()>;
}
