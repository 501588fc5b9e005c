//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a participant lies on shortest
//! choice paths between other pairs. High-betweenness participants are
//! "brokers": removing them lengthens or cuts the paths between others.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Raw scores are scaled by `1 / ((n − 1)(n − 2))`, the number of ordered
//! pairs a node could sit between in a directed graph. For `n ≤ 2` no node
//! can be between two others and every score is 0.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    Direction,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use crate::graph::build::ChoiceGraph;

/// Normalized betweenness centrality for every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(g: &ChoiceGraph) -> HashMap<String, f64> {
    let raw = brandes(g);
    let n = g.node_count();
    let scale = if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        1.0
    };

    g.graph
        .node_identifiers()
        .map(|idx| (g.label(idx).to_string(), raw[idx.index()] * scale))
        .collect()
}

/// Unnormalized pair dependencies summed over all sources, by node index.
fn brandes(g: &ChoiceGraph) -> Vec<f64> {
    let graph = &g.graph;
    let n = graph.node_count();
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.node_identifiers() {
        let si = graph.to_index(s);

        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[si] = Some(0);

        let mut queue: VecDeque<NodeIndex> = VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            let vi = graph.to_index(v);
            stack.push(v);
            let next = dist[vi].map_or(0, |d| d + 1);

            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                let wi = graph.to_index(w);

                if dist[wi].is_none() {
                    dist[wi] = Some(next);
                    queue.push_back(w);
                }

                if dist[wi] == Some(next) {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = graph.to_index(w);

            for &v in &predecessors[wi] {
                let vi = graph.to_index(v);
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
