use std::fs;
use std::path::Path;

use crate::domain::language::Language;
use crate::domain::reference::ReferenceExtractor;
use crate::domain::source_file::{ScannedFile, SourceFile};
use crate::error::{Result, ScanError};
use crate::infrastructure::line_counter::count_records;
use crate::ports::ReferenceSource;

/// Filesystem-backed reference source: reads a file once, counts its lines and
/// extracts its references. Non-UTF-8 bytes are decoded lossily.
#[derive(Debug, Clone)]
pub struct FileScanner {
    extractor: ReferenceExtractor,
}

impl FileScanner {
    pub fn new(extractor: ReferenceExtractor) -> Self {
        Self { extractor }
    }

    pub fn for_language(language: Language) -> Result<Self> {
        Ok(Self::new(ReferenceExtractor::for_language(language)?))
    }
}

impl ReferenceSource for FileScanner {
    fn scan(&self, path: &Path) -> Result<ScannedFile> {
        let bytes = fs::read(path).map_err(|e| ScanError::read(path, e))?;
        let lines = count_records(bytes.as_slice()).map_err(|e| ScanError::read(path, e))?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(ScannedFile {
            file: SourceFile::new(path, lines),
            references: self.extractor.extract(&content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_python_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mod1.py");
        fs::write(&path, "import helper\nhelper.run()\nhelper.run()\n").unwrap();

        let scanner = FileScanner::for_language(Language::Python).unwrap();
        let scanned = scanner.scan(&path).unwrap();
        assert_eq!(scanned.file.name, "mod1");
        assert_eq!(scanned.file.lines, 3);
        assert_eq!(scanned.references, vec!["helper", "helper"]);
    }

    #[test]
    fn test_scan_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.pkb");
        fs::write(&path, b"-- caf\xe9\nutil_pkg.log(1);\n").unwrap();

        let scanner = FileScanner::for_language(Language::Plsql).unwrap();
        let scanned = scanner.scan(&path).unwrap();
        assert_eq!(scanned.file.lines, 2);
        assert_eq!(scanned.references, vec!["util_pkg"]);
    }

    #[test]
    fn test_scan_missing_file() {
        let dir = tempdir().unwrap();
        let scanner = FileScanner::for_language(Language::Python).unwrap();
        assert!(matches!(
            scanner.scan(&dir.path().join("missing.py")),
            Err(ScanError::Read { .. })
        ));
    }
}
