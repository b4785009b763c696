//! Dependency Graph
//!
//! Directed, weighted adjacency list keyed by symbolic name. Nodes keep their
//! first-insertion order; each node keeps its outgoing edges in insertion order.
//! The graph only grows: nothing removes nodes or edges.

use std::collections::HashMap;
use std::fmt;

use crate::domain::source_file::ScannedFile;

/// An outgoing edge: the adjacent node and its accumulated weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: String,
    pub weight: f64,
}

/// How `add_edge` treats non-matching edges it walks past while looking for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulationPolicy {
    /// Non-matching edges are left untouched.
    #[default]
    Preserve,
    /// Every non-matching edge visited during the scan has its weight zeroed.
    /// Legacy accumulation: destroys weights accumulated on sibling edges.
    ResetOnScan,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    name: String,
    edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<NodeEntry>,
    index: HashMap<String, usize>,
    policy: AccumulationPolicy,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AccumulationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> AccumulationPolicy {
        self.policy
    }

    /// Register `node` if it is unknown. Returns its position in insertion order.
    pub fn add_node(&mut self, node: &str) -> usize {
        if let Some(&idx) = self.index.get(node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            name: node.to_string(),
            edges: Vec::new(),
        });
        self.index.insert(node.to_string(), idx);
        idx
    }

    /// Add `weight` to the edge `from -> to`, creating both nodes and the edge as needed.
    ///
    /// Repeated calls for the same pair converge on a single edge whose weight is the
    /// sum of every weight added for that pair (under `ResetOnScan`, minus resets).
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        let from_idx = self.add_node(from);
        self.add_node(to);

        let policy = self.policy;
        let edges = &mut self.nodes[from_idx].edges;
        for edge in edges.iter_mut() {
            if edge.to == to {
                edge.weight += weight;
                return;
            }
            if policy == AccumulationPolicy::ResetOnScan {
                edge.weight = 0.0;
            }
        }

        edges.push(Edge {
            to: to.to_string(),
            weight,
        });
    }

    /// Merge one scanned file: every reference `q` adds weight 1 to `q -> file`, and the
    /// file's own name is registered even when it references nothing.
    pub fn merge_file(&mut self, scanned: &ScannedFile) {
        let name = scanned.file.name.as_str();
        for qualifier in &scanned.references {
            self.add_edge(qualifier, name, 1.0);
        }
        self.add_node(name);
    }

    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    /// Outgoing edges of `node`, or `None` for an unknown node.
    pub fn edges(&self, node: &str) -> Option<&[Edge]> {
        self.index
            .get(node)
            .map(|&idx| self.nodes[idx].edges.as_slice())
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges(from)?
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.weight)
    }

    /// Nodes with their outgoing edges, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Edge])> {
        self.nodes
            .iter()
            .map(|n| (n.name.as_str(), n.edges.as_slice()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// One line per edge: "`<node>` is referenced by `<to>`, weight `<w>`".
    pub fn report(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().flat_map(|(node, edges)| {
            edges.iter().map(move |edge| {
                format!(
                    "{} is referenced by {}, weight {:.2}",
                    node, edge.to, edge.weight
                )
            })
        })
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
