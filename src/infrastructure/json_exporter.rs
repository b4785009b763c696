use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::api::dto::Snapshot;
use crate::error::{Result, ScanError};
use crate::ports::SnapshotExporter;

/// Writes the snapshot as pretty-printed JSON (two-space indentation, UTF-8).
pub struct JsonExporter;

impl SnapshotExporter for JsonExporter {
    fn export(&self, snapshot: &Snapshot, path: &Path) -> Result<()> {
        let write_err = |source| ScanError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush().map_err(write_err)?;

        info!(path = %path.display(), records = snapshot.len(), "snapshot written");
        Ok(())
    }
}
