//! Graph construction from packed choice rows.
//!
//! # Overview
//!
//! An edge `A → B` means "A chose B". Every row source is a node even when
//! its choice list is empty, and every chosen label becomes a node on first
//! mention. Row sources are inserted first, in row order, then any target
//! not yet seen; layouts seeded with the same value depend on this order.
//!
//! ## No Multi-Edges
//!
//! petgraph allows parallel edges; a repeated choice is skipped on insert so
//! the graph holds each `(source, target)` pair at most once.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex, UnGraph},
    visit::EdgeRef,
};
use tracing::instrument;

use crate::adjacency::{Edge, PackedRow, source_labels, unpack_edges};

// ---------------------------------------------------------------------------
// ChoiceGraph
// ---------------------------------------------------------------------------

/// A directed choice network.
///
/// Nodes are participant labels. Built once per analysis pass and not
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ChoiceGraph {
    /// Directed graph: nodes = labels, edges = choices.
    pub graph: DiGraph<String, ()>,
    /// Mapping from label to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl ChoiceGraph {
    /// Build a graph from packed rows.
    #[must_use]
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: &[PackedRow]) -> Self {
        Self::from_edges(&source_labels(rows), &unpack_edges(rows))
    }

    /// Build a graph from an explicit node list plus an edge list.
    ///
    /// Edge endpoints missing from `nodes` are added on first mention.
    #[must_use]
    pub fn from_edges<S: AsRef<str>>(nodes: &[S], edges: &[Edge]) -> Self {
        let mut g = Self::empty();
        for node in nodes {
            g.ensure_node(node.as_ref());
        }
        for (source, target) in edges {
            g.add_edge(source, target);
        }
        g
    }

    fn empty() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_map.insert(label.to_string(), idx);
        idx
    }

    fn add_edge(&mut self, source: &str, target: &str) {
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        // Avoid duplicate edges (petgraph allows them by default).
        if !self.graph.contains_edge(s, t) {
            self.graph.add_edge(s, t, ());
        }
    }

    /// Return the number of nodes (participants).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (choices).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// Return the label of a node.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> &str {
        self.graph.node_weight(idx).map_or("", String::as_str)
    }

    /// Labels in sorted order.
    #[must_use]
    pub fn sorted_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.graph.node_weights().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// The node set as owned labels.
    #[must_use]
    pub fn node_set(&self) -> BTreeSet<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// All edges as `(source, target)` label pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph
            .edge_references()
            .map(|e| (self.label(e.source()), self.label(e.target())))
    }

    /// `true` if `source → target` is a choice in this graph.
    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(s), Some(t)) => self.graph.contains_edge(s, t),
            _ => false,
        }
    }

    /// `true` if both `a → b` and `b → a` are present.
    #[must_use]
    pub fn is_mutual(&self, a: &str, b: &str) -> bool {
        self.contains_edge(a, b) && self.contains_edge(b, a)
    }

    /// Number of participants who chose `label`.
    #[must_use]
    pub fn in_degree(&self, label: &str) -> Option<usize> {
        self.node_index(label)
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
    }

    /// Number of participants `label` chose.
    #[must_use]
    pub fn out_degree(&self, label: &str) -> Option<usize> {
        self.node_index(label)
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Outgoing).count())
    }

    /// Out-neighbors of `label`, sorted.
    #[must_use]
    pub fn neighbors(&self, label: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(label) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.label(n))
            .collect();
        out.sort_unstable();
        out
    }

    /// `true` if the node has neither in- nor out-edges.
    #[must_use]
    pub fn is_isolated(&self, idx: NodeIndex) -> bool {
        self.graph.neighbors_undirected(idx).next().is_none()
    }

    /// Undirected projection: one edge per connected pair, direction dropped.
    ///
    /// Node indices are preserved, so a `NodeIndex` from this graph is valid
    /// in the projection.
    #[must_use]
    pub fn to_undirected(&self) -> UnGraph<String, ()> {
        let mut un: UnGraph<String, ()> =
            UnGraph::with_capacity(self.node_count(), self.edge_count());
        for label in self.graph.node_weights() {
            un.add_node(label.clone());
        }
        for e in self.graph.edge_references() {
            if !un.contains_edge(e.source(), e.target()) {
                un.add_edge(e.source(), e.target(), ());
            }
        }
        un
    }
}

/// Build a graph from borrowed `(source, target)` pairs.
#[must_use]
pub fn graph_from_edge_list(edges: &[(&str, &str)]) -> ChoiceGraph {
    let owned: Vec<Edge> = edges
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect();
    ChoiceGraph::from_edges::<&str>(&[], &owned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
