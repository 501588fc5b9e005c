//! Closeness centrality over incoming distances.
//!
//! For a directed choice graph the distance that matters is how quickly the
//! others reach a participant, so BFS follows edges backwards. With `r` the
//! number of nodes that can reach `u` (including `u`) and `Σd` the sum of
//! their distances:
//!
//! ```text
//! C(u) = (r − 1) / Σd  ·  (r − 1) / (n − 1)
//! ```
//!
//! The second factor (Wasserman–Faust) scales down nodes that only a small
//! part of the group can reach. A node nobody reaches scores 0.

use std::collections::HashMap;

use petgraph::{Direction, visit::IntoNodeIdentifiers};
use tracing::instrument;

use crate::graph::build::ChoiceGraph;
use crate::metrics::basic::bfs_distances;

/// Closeness centrality for every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(g: &ChoiceGraph) -> HashMap<String, f64> {
    let n = g.node_count();

    g.graph
        .node_identifiers()
        .map(|idx| {
            let dist = bfs_distances(g, idx, Direction::Incoming);
            let reached: Vec<usize> = dist.into_iter().flatten().collect();
            let total: usize = reached.iter().sum();

            let score = if total > 0 && n > 1 {
                let others = (reached.len() - 1) as f64;
                (others / total as f64) * (others / (n - 1) as f64)
            } else {
                0.0
            };
            (g.label(idx).to_string(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::graph_from_edge_list;

    #[test]
    fn star_leaves_are_reached_by_the_center() {
        // A → B, A → C: B is reached by A only (r = 2, Σd = 1).
        let g = graph_from_edge_list(&[("A", "B"), ("A", "C")]);
        let cc = closeness_centrality(&g);
        assert!((cc["A"] - 0.0).abs() < 1e-12);
        assert!((cc["B"] - 0.5).abs() < 1e-12, "B = {}", cc["B"]);
        assert!((cc["C"] - 0.5).abs() < 1e-12, "C = {}", cc["C"]);
    }

    #[test]
    fn chain_end_is_closest() {
        // A → B → C: C reached by B (1) and A (2) → 2/3 · 2/2.
        let g = graph_from_edge_list(&[("A", "B"), ("B", "C")]);
        let cc = closeness_centrality(&g);
        assert!((cc["C"] - 2.0 / 3.0).abs() < 1e-12, "C = {}", cc["C"]);
        assert!((cc["B"] - 0.5).abs() < 1e-12, "B = {}", cc["B"]);
        assert!((cc["A"] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn complete_reciprocal_graph_is_one() {
        let g = graph_from_edge_list(&[
            ("A", "B"),
            ("B", "A"),
            ("A", "C"),
            ("C", "A"),
            ("B", "C"),
            ("C", "B"),
        ]);
        let cc = closeness_centrality(&g);
        for id in ["A", "B", "C"] {
            assert!((cc[id] - 1.0).abs() < 1e-12, "{id} = {}", cc[id]);
        }
    }

    #[test]
    fn empty_graph_is_empty() {
        assert!(closeness_centrality(&graph_from_edge_list(&[])).is_empty());
    }
}
