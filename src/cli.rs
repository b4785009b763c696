// Command-line surface shared by the `refscan` and `refscan-files` binaries.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::ScanConfig;
use crate::domain::language::Language;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    pub root: PathBuf,

    /// Source language: python (.py) or plsql (.pkb)
    pub language: Language,
}

impl Cli {
    pub fn config(&self) -> ScanConfig {
        ScanConfig::new(&self.root, self.language)
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`). Stdout stays free for reports.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
