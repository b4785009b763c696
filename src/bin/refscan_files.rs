// File-metric entry point: one record per file with in-file reference counts.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use refscan::application::{FileMetricsUsecase, ScanConfig};
use refscan::cli::{init_tracing, Cli};
use refscan::infrastructure::{FileScanner, JsonExporter};

fn run(config: &ScanConfig) -> Result<()> {
    let scanner = FileScanner::for_language(config.language)?;
    let usecase = FileMetricsUsecase {
        source: &scanner,
        exporter: &JsonExporter,
    };

    let snapshot = usecase.run(config)?;
    tracing::info!(
        records = snapshot.len(),
        workers = config.workers,
        output = %config.output.display(),
        "analysis completed"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli.config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
