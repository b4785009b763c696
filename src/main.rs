// Graph-mode entry point: weighted reference graph across the whole tree.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use refscan::application::{DependencyGraphUsecase, ScanConfig};
use refscan::cli::{init_tracing, Cli};
use refscan::domain::graph::AccumulationPolicy;
use refscan::infrastructure::{FileScanner, JsonExporter};

fn run(config: &ScanConfig) -> Result<()> {
    let scanner = FileScanner::for_language(config.language)?;
    let usecase = DependencyGraphUsecase {
        source: &scanner,
        exporter: &JsonExporter,
        policy: AccumulationPolicy::Preserve,
    };

    let result = usecase.run(config)?;
    print!("{}", result.graph);

    tracing::info!(
        records = result.snapshot.len(),
        edges = result.graph.edge_count(),
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
