//! PageRank by power iteration.
//!
//! # Overview
//!
//! A participant chosen by well-chosen participants ranks higher than one
//! chosen by the same number of peripheral participants.
//!
//! # Algorithm
//!
//! Standard PageRank uses the iterative power method on the adjacency matrix:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//!                     + d * Σ PR(w) / N               for each dangling w
//! ```
//!
//! where `d` is the damping factor (default 0.85). Ranks start uniform at
//! `1 / N`. Iteration stops once the L1 norm of the rank delta falls below
//! `N * tolerance`; hitting `max_iter` first is an error, never a silently
//! partial result.

use std::collections::HashMap;

use petgraph::{
    Direction,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::{debug, instrument, warn};

use crate::config::PageRankConfig;
use crate::error::SnaError;
use crate::graph::build::ChoiceGraph;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: label → score. Scores sum to 1.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Run the power iteration and report how it went, converged or not.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank_iterate(g: &ChoiceGraph, config: &PageRankConfig) -> PageRankResult {
    let graph = &g.graph;
    let n = graph.node_count();

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let out_degree: Vec<usize> = graph
        .node_indices()
        .map(|v| graph.neighbors_directed(v, Direction::Outgoing).count())
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        // Mass held by nodes that chose nobody is spread over everyone.
        let dangling: f64 = ranks
            .iter()
            .zip(&out_degree)
            .filter(|&(_, &d)| d == 0)
            .map(|(r, _)| r)
            .sum();
        next.fill((1.0 - config.damping + config.damping * dangling) / n_f64);

        for v in graph.node_identifiers() {
            let i = graph.to_index(v);
            if out_degree[i] == 0 {
                continue;
            }
            let share = config.damping * ranks[i] / out_degree[i] as f64;
            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                next[graph.to_index(w)] += share;
            }
        }

        let delta: f64 = ranks.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut ranks, &mut next);
        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "pagerank finished");

    let scores = graph
        .node_identifiers()
        .map(|node| (g.label(node).to_string(), ranks[graph.to_index(node)]))
        .collect();

    PageRankResult {
        scores,
        iterations,
        converged,
    }
}

/// PageRank scores for every node.
///
/// # Errors
///
/// Returns [`SnaError::PageRankNotConverged`] if the iteration cap is
/// reached before the tolerance is met.
pub fn pagerank(
    g: &ChoiceGraph,
    config: &PageRankConfig,
) -> Result<HashMap<String, f64>, SnaError> {
    let result = pagerank_iterate(g, config);
    if !result.converged {
        warn!(iterations = result.iterations, "pagerank did not converge");
        return Err(SnaError::PageRankNotConverged {
            iterations: result.iterations,
        });
    }
    Ok(result.scores)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
