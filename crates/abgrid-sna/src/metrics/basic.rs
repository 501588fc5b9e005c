//! Static node metrics: in-degree centrality, reachability, degree status.
//!
//! # Overview
//!
//! These metrics need nothing beyond adjacency and breadth-first search.
//! All maps are keyed by node label and cover every node of the graph.
//!
//! ## Reachability Convention
//!
//! `reachability_ratio(v) = |{u ≠ v : u reachable from v}| / (n − 1)`.
//! The node itself is excluded from both numerator and denominator, so a
//! node reaching everybody scores exactly 1.0 and a sink scores 0.0.

use std::collections::{HashMap, VecDeque};

use petgraph::{Direction, graph::NodeIndex, visit::IntoNodeIdentifiers};
use serde::Serialize;

use crate::error::SnaError;
use crate::graph::build::ChoiceGraph;

// ---------------------------------------------------------------------------
// In-Degree Centrality
// ---------------------------------------------------------------------------

/// In-degree divided by `n − 1` for every node.
///
/// # Errors
///
/// Returns [`SnaError::DegenerateGraph`] for a single-node graph, where the
/// normalization `n − 1` is zero. An empty graph yields an empty map.
#[allow(clippy::cast_precision_loss)]
pub fn in_degree_centrality(g: &ChoiceGraph) -> Result<HashMap<String, f64>, SnaError> {
    let n = g.node_count();
    if n == 1 {
        return Err(SnaError::DegenerateGraph {
            metric: "in-degree centrality",
            node_count: n,
        });
    }

    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
    Ok(g.graph
        .node_identifiers()
        .map(|idx| {
            let in_d = g.graph.neighbors_directed(idx, Direction::Incoming).count();
            (g.label(idx).to_string(), in_d as f64 * scale)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Reachability
// ---------------------------------------------------------------------------

/// Share of other nodes reachable from each node along directed paths.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reachability_ratio(g: &ChoiceGraph) -> HashMap<String, f64> {
    let n = g.node_count();
    g.graph
        .node_identifiers()
        .map(|idx| {
            let ratio = if n > 1 {
                let others = reachable_count(g, idx, Direction::Outgoing) - 1;
                others as f64 / (n - 1) as f64
            } else {
                0.0
            };
            (g.label(idx).to_string(), ratio)
        })
        .collect()
}

/// Number of nodes reachable from `start` (including `start`) following
/// edges in `dir`.
pub(crate) fn reachable_count(g: &ChoiceGraph, start: NodeIndex, dir: Direction) -> usize {
    bfs_distances(g, start, dir).iter().filter(|d| d.is_some()).count()
}

/// Hop distances from `start` following edges in `dir`; `None` = unreachable.
pub(crate) fn bfs_distances(
    g: &ChoiceGraph,
    start: NodeIndex,
    dir: Direction,
) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; g.node_count()];
    dist[start.index()] = Some(0);

    let mut queue = VecDeque::from([start]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v.index()].map_or(0, |d| d + 1);
        for w in g.graph.neighbors_directed(v, dir) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(next);
                queue.push_back(w);
            }
        }
    }
    dist
}

// ---------------------------------------------------------------------------
// Degree Status
// ---------------------------------------------------------------------------

/// Whether a participant was chosen and whether they chose anybody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeStatus {
    /// Chose someone and was chosen.
    Normal,
    /// Nobody chose this participant.
    NoInDegree,
    /// This participant chose nobody.
    NoOutDegree,
    /// Neither chose nor was chosen.
    Isolated,
}

impl DegreeStatus {
    /// Classify from in/out degree.
    #[must_use]
    pub const fn from_degrees(in_degree: usize, out_degree: usize) -> Self {
        match (in_degree == 0, out_degree == 0) {
            (false, false) => Self::Normal,
            (true, false) => Self::NoInDegree,
            (false, true) => Self::NoOutDegree,
            (true, true) => Self::Isolated,
        }
    }

    /// Numeric code: 1 for no in-degree plus 2 for no out-degree.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::NoInDegree => 1,
            Self::NoOutDegree => 2,
            Self::Isolated => 3,
        }
    }

    /// `true` if nobody chose this participant.
    #[must_use]
    pub const fn has_no_indegree(self) -> bool {
        matches!(self, Self::NoInDegree | Self::Isolated)
    }
}

/// Degree status of every node.
#[must_use]
pub fn degree_status(g: &ChoiceGraph) -> HashMap<String, DegreeStatus> {
    g.graph
        .node_identifiers()
        .map(|idx| {
            let in_d = g.graph.neighbors_directed(idx, Direction::Incoming).count();
            let out_d = g.graph.neighbors_directed(idx, Direction::Outgoing).count();
            (
                g.label(idx).to_string(),
                DegreeStatus::from_degrees(in_d, out_d),
            )
        })
        .collect()
}

/// Sorted out-neighbors of every node, joined for display (`"B, C"`).
#[must_use]
pub fn links(g: &ChoiceGraph) -> HashMap<String, String> {
    g.graph
        .node_weights()
        .map(|label| (label.clone(), g.neighbors(label).join(", ")))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
