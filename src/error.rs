//! Error taxonomy for refscan.
//!
//! Usage errors never reach this type: clap rejects them before any work starts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A directory under the root could not be listed. Always fatal.
    #[error("error walking through directory {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be opened or read.
    #[error("error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured call pattern failed to compile.
    #[error("error compiling regex: {0}")]
    Pattern(#[from] regex::Error),

    #[error("error building worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("error serializing data to JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
