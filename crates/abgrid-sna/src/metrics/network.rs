//! Network-level (macro) statistics for a choice graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: participants and choices.
//! - **reciprocal_edge_count**: unordered pairs `{u, v}` with both `u → v`
//!   and `v → u`.
//! - **density**: `edge_count / (n (n − 1))`; zero for graphs with fewer
//!   than 2 nodes.
//! - **degree_centralization**: on the undirected projection,
//!   `Σ (max_deg − deg(v)) / ((n − 1)(n − 2))`. Zero when every participant
//!   has the same number of ties, 1 for a star. Undefined for `n ≤ 2`.
//! - **transitivity**: closed over open triads. For each `v`, the ordered
//!   pairs of out-neighbors `(u, w)` with `u → w` count as closed; the
//!   denominator is `Σ d(v)(d(v) − 1)` over out-degrees.
//! - **reciprocity**: share of edges whose reverse is present. A graph with
//!   no edges has reciprocity 0.

use std::collections::HashSet;

use petgraph::{
    Direction,
    visit::{EdgeRef, IntoNodeIdentifiers},
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::SnaError;
use crate::graph::build::ChoiceGraph;
use crate::metrics::round_to;

// ---------------------------------------------------------------------------
// NetworkSummary
// ---------------------------------------------------------------------------

/// Macro-level statistics of one network, floats rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub reciprocal_edge_count: usize,
    pub density: f64,
    pub degree_centralization: f64,
    pub transitivity: f64,
    pub reciprocity: f64,
}

/// Compute every network statistic, rounded to `precision` places.
///
/// # Errors
///
/// Returns [`SnaError::DegenerateGraph`] if the graph has 2 nodes or fewer,
/// where degree centralization is undefined.
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn network_summary(g: &ChoiceGraph, precision: u32) -> Result<NetworkSummary, SnaError> {
    let summary = NetworkSummary {
        node_count: g.node_count(),
        edge_count: g.edge_count(),
        reciprocal_edge_count: reciprocal_edge_count(g),
        density: round_to(density(g), precision),
        degree_centralization: round_to(degree_centralization(g)?, precision),
        transitivity: round_to(transitivity(g), precision),
        reciprocity: round_to(reciprocity(g), precision),
    };
    debug!(?summary, "network summary");
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Individual statistics
// ---------------------------------------------------------------------------

/// Directed density: edges over `n (n − 1)` possible choices.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(g: &ChoiceGraph) -> f64 {
    let n = g.node_count();
    if n < 2 {
        return 0.0;
    }
    g.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Freeman degree centralization of the undirected projection.
///
/// # Errors
///
/// Returns [`SnaError::DegenerateGraph`] for `n ≤ 2`.
#[allow(clippy::cast_precision_loss)]
pub fn degree_centralization(g: &ChoiceGraph) -> Result<f64, SnaError> {
    let n = g.node_count();
    if n <= 2 {
        return Err(SnaError::DegenerateGraph {
            metric: "degree centralization",
            node_count: n,
        });
    }

    let un = g.to_undirected();
    let degrees: Vec<usize> = un.node_indices().map(|idx| un.neighbors(idx).count()).collect();
    let max = degrees.iter().copied().max().unwrap_or(0);
    let spread: usize = degrees.iter().map(|&d| max - d).sum();

    Ok(spread as f64 / ((n - 1) * (n - 2)) as f64)
}

/// Global clustering coefficient over out-neighborhoods.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(g: &ChoiceGraph) -> f64 {
    let graph = &g.graph;
    let mut closed = 0_usize;
    let mut possible = 0_usize;

    for v in graph.node_identifiers() {
        let out: HashSet<_> = graph
            .neighbors_directed(v, Direction::Outgoing)
            .filter(|&u| u != v)
            .collect();
        let d = out.len();
        possible += d * d.saturating_sub(1);

        for &u in &out {
            closed += graph
                .neighbors_directed(u, Direction::Outgoing)
                .filter(|&w| w != u && out.contains(&w))
                .count();
        }
    }

    if closed == 0 {
        0.0
    } else {
        closed as f64 / possible as f64
    }
}

/// Share of edges whose reverse edge is also present.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reciprocity(g: &ChoiceGraph) -> f64 {
    let edges = g.edge_count();
    if edges == 0 {
        return 0.0;
    }
    (2 * reciprocal_edge_count(g)) as f64 / edges as f64
}

/// Number of unordered mutual pairs.
#[must_use]
pub fn reciprocal_edge_count(g: &ChoiceGraph) -> usize {
    g.graph
        .edge_references()
        .filter(|e| e.source() < e.target() && g.graph.contains_edge(e.target(), e.source()))
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
