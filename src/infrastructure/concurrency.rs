/// Concurrency management for refscan.
///
/// File-metric mode fans contiguous batches of paths out to a fixed rayon pool and fans
/// records back in over a bounded channel. Graph mode extracts in parallel but merges
/// every edge on the calling thread, in collection order.

use std::path::PathBuf;

use crossbeam_channel::Sender;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::api::dto::FileRecord;
use crate::domain::graph::{AccumulationPolicy, DependencyGraph};
use crate::domain::source_file::{ScannedFile, SourceFile};
use crate::error::Result;
use crate::ports::ReferenceSource;

/// Number of workers: the available parallelism, minimum 1.
pub fn worker_count() -> usize {
    std::cmp::max(1, num_cpus::get())
}

/// Build a dedicated pool with exactly `workers` threads.
pub fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(std::cmp::max(1, workers))
        .thread_name(|i| format!("refscan-worker-{}", i + 1))
        .build()?;
    Ok(pool)
}

/// Split `items` into `workers` contiguous batches of `len / workers` items each;
/// the last batch absorbs the remainder. With more workers than items every batch
/// but the last is empty.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    let workers = std::cmp::max(1, workers);
    let batch_size = items.len() / workers;

    (0..workers)
        .map(|i| {
            let start = i * batch_size;
            let end = if i == workers - 1 {
                items.len()
            } else {
                start + batch_size
            };
            &items[start..end]
        })
        .collect()
}

/// Outcome of one path in file-metric mode.
#[derive(Debug)]
enum Scanned {
    Record(FileRecord),
    Skipped(PathBuf),
}

/// Everything collected by [`fan_out`]. Record order follows worker scheduling.
#[derive(Debug, Default)]
pub struct FanOutReport {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<PathBuf>,
}

/// Scan every path on a pool of `workers` threads and collect one record per readable file.
///
/// Each worker owns one batch from [`partition`] and sends exactly one message per path to
/// a channel sized to the path count, so no send ever blocks. A coordinator thread waits on
/// the pool scope and then drops the last sender; the calling thread drains the channel
/// until it closes. Unreadable files are logged and skipped.
pub fn fan_out<S>(paths: &[PathBuf], workers: usize, source: &S) -> Result<FanOutReport>
where
    S: ReferenceSource + ?Sized,
{
    let workers = std::cmp::max(1, workers);
    let pool = build_pool(workers)?;
    let batches = partition(paths, workers);
    let (tx, rx) = crossbeam_channel::bounded::<Scanned>(std::cmp::max(1, paths.len()));

    info!(files = paths.len(), workers, "starting workers");

    let mut report = FanOutReport::default();
    std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.scope(|s| {
                for (i, batch) in batches.into_iter().enumerate() {
                    let tx = tx.clone();
                    s.spawn(move |_| scan_batch(i + 1, batch, source, &tx));
                }
            });
            drop(tx);
        });

        for message in rx.iter() {
            match message {
                Scanned::Record(record) => report.records.push(record),
                Scanned::Skipped(path) => report.skipped.push(path),
            }
        }
    });

    info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        "workers finished"
    );
    Ok(report)
}

fn scan_batch<S>(worker: usize, batch: &[PathBuf], source: &S, results: &Sender<Scanned>)
where
    S: ReferenceSource + ?Sized,
{
    debug!(worker, files = batch.len(), "worker started");
    for path in batch {
        let message = match source.scan(path) {
            Ok(scanned) => Scanned::Record(FileRecord::from(scanned)),
            Err(e) => {
                warn!(worker, error = %e, "skipping file");
                Scanned::Skipped(path.clone())
            }
        };
        if results.send(message).is_err() {
            return;
        }
    }
}

/// Build the dependency graph for `paths`.
///
/// Extraction runs on a pool of `workers` threads; the first unreadable file aborts the
/// build. Merging is sequential and follows `paths` order, so the graph is identical to
/// the one a single thread would build.
pub fn build_graph<S>(
    paths: &[PathBuf],
    workers: usize,
    source: &S,
    policy: AccumulationPolicy,
) -> Result<(DependencyGraph, Vec<SourceFile>)>
where
    S: ReferenceSource + ?Sized,
{
    let pool = build_pool(workers)?;
    let scanned: Vec<ScannedFile> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| source.scan(path))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut graph = DependencyGraph::with_policy(policy);
    let mut files = Vec::with_capacity(scanned.len());
    for file in scanned {
        graph.merge_file(&file);
        files.push(file.file);
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    Ok((graph, files))
}

/// Single-threaded reference build: scan and merge one file at a time.
pub fn build_graph_sequential<S>(
    paths: &[PathBuf],
    source: &S,
    policy: AccumulationPolicy,
) -> Result<(DependencyGraph, Vec<SourceFile>)>
where
    S: ReferenceSource + ?Sized,
{
    let mut graph = DependencyGraph::with_policy(policy);
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let scanned = source.scan(path)?;
        graph.merge_file(&scanned);
        files.push(scanned.file);
    }
    Ok((graph, files))
}
