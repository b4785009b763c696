use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::graph::DependencyGraph;
use crate::domain::reference::tally;
use crate::domain::source_file::{ScannedFile, SourceFile};

/// File-metric record: one per file, reference counts local to that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "PackageName")]
    pub package_name: String,
    #[serde(rename = "NumberOfLines")]
    pub number_of_lines: usize,
    #[serde(rename = "DirectoryName")]
    pub directory_name: String,
    #[serde(rename = "References")]
    pub references: BTreeMap<String, usize>,
}

/// Graph record: one per node, edge weights accumulated across the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(rename = "Package")]
    pub package: String,
    #[serde(rename = "NumberOfLines")]
    pub number_of_lines: usize,
    #[serde(rename = "DirectoryName")]
    pub directory_name: String,
    #[serde(rename = "CalledBy")]
    pub called_by: BTreeMap<String, f64>,
}

/// The serialized output of one run. Serializes as a bare list of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Files(Vec<FileRecord>),
    Graph(Vec<PackageRecord>),
}

impl Snapshot {
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Files(records) => records.len(),
            Snapshot::Graph(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&ScannedFile> for FileRecord {
    fn from(scanned: &ScannedFile) -> Self {
        FileRecord {
            package_name: scanned.file.name.clone(),
            number_of_lines: scanned.file.lines,
            directory_name: scanned.file.directory.clone(),
            references: tally(scanned.references.iter().map(String::as_str)),
        }
    }
}

impl From<ScannedFile> for FileRecord {
    fn from(scanned: ScannedFile) -> Self {
        FileRecord {
            package_name: scanned.file.name,
            number_of_lines: scanned.file.lines,
            directory_name: scanned.file.directory,
            references: tally(scanned.references),
        }
    }
}

/// Shape the graph into one record per node, in node insertion order.
///
/// Nodes backed by a scanned file carry its line count and directory. Files sharing a
/// stem add their line counts; the first directory seen is kept.
pub fn graph_records(graph: &DependencyGraph, files: &[SourceFile]) -> Vec<PackageRecord> {
    let mut metadata: HashMap<&str, (usize, &str)> = HashMap::new();
    for file in files {
        metadata
            .entry(file.name.as_str())
            .and_modify(|(lines, _)| *lines += file.lines)
            .or_insert((file.lines, file.directory.as_str()));
    }

    graph
        .iter()
        .map(|(node, edges)| {
            let (lines, directory) = metadata.get(node).copied().unwrap_or((0, ""));
            PackageRecord {
                package: node.to_string(),
                number_of_lines: lines,
                directory_name: directory.to_string(),
                called_by: edges
                    .iter()
                    .map(|edge| (edge.to.clone(), edge.weight))
                    .collect(),
            }
        })
        .collect()
}
