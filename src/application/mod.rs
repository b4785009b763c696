use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::api::dto::{graph_records, Snapshot};
use crate::domain::graph::{AccumulationPolicy, DependencyGraph};
use crate::domain::language::Language;
use crate::infrastructure::concurrency::{build_graph, fan_out, worker_count};
use crate::infrastructure::path_collector::collect_paths;
use crate::ports::{ReferenceSource, SnapshotExporter};

/// Default snapshot file, written to the current working directory.
pub const OUTPUT_FILE: &str = "data.json";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub language: Language,
    pub workers: usize,
    pub output: PathBuf,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            root: root.into(),
            language,
            workers: worker_count(),
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}

fn collect(config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let paths = collect_paths(&config.root, config.language)
        .with_context(|| format!("Failed to collect {} files", config.language))?;
    info!(
        root = %config.root.display(),
        language = %config.language,
        files = paths.len(),
        "collected source files"
    );
    Ok(paths)
}

fn export(exporter: &dyn SnapshotExporter, snapshot: &Snapshot, output: &Path) -> Result<()> {
    exporter
        .export(snapshot, output)
        .with_context(|| format!("Failed to write snapshot {}", output.display()))
}

/// File-metric mode: one record per readable file, scanned on a worker pool.
pub struct FileMetricsUsecase<'a> {
    pub source: &'a dyn ReferenceSource,
    pub exporter: &'a dyn SnapshotExporter,
}

impl<'a> FileMetricsUsecase<'a> {
    pub fn run(&self, config: &ScanConfig) -> Result<Snapshot> {
        let paths = collect(config)?;
        let report = fan_out(&paths, config.workers, self.source)?;

        let snapshot = Snapshot::Files(report.records);
        export(self.exporter, &snapshot, &config.output)?;
        Ok(snapshot)
    }
}

/// Result of a graph-mode run.
#[derive(Debug)]
pub struct GraphRun {
    pub graph: DependencyGraph,
    pub snapshot: Snapshot,
}

/// Graph mode: one record per node, weights accumulated across the whole tree.
/// Any unreadable file aborts the run before anything is written.
pub struct DependencyGraphUsecase<'a> {
    pub source: &'a dyn ReferenceSource,
    pub exporter: &'a dyn SnapshotExporter,
    pub policy: AccumulationPolicy,
}

impl<'a> DependencyGraphUsecase<'a> {
    pub fn run(&self, config: &ScanConfig) -> Result<GraphRun> {
        let paths = collect(config)?;
        let (graph, files) = build_graph(&paths, config.workers, self.source, self.policy)
            .context("Failed to build dependency graph")?;

        let snapshot = Snapshot::Graph(graph_records(&graph, &files));
        export(self.exporter, &snapshot, &config.output)?;
        Ok(GraphRun { graph, snapshot })
    }
}
