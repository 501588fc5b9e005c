//! Centrality metrics and network statistics for choice graphs.
//!
//! # Overview
//!
//! Node-level (micro) metrics answer "who is central?" from different
//! angles; network-level (macro) statistics describe the group as a whole:
//!
//! - **In-degree centrality** (`basic`): share of peers who chose the node.
//! - **PageRank** (`pagerank`): importance inherited from important choosers.
//! - **Betweenness** (`betweenness`): how often the node bridges others.
//! - **Closeness** (`closeness`): how near the node is to those reaching it.
//! - **Reachability** (`basic`): share of peers the node can reach.
//! - **Summary** (`network`): centralization, transitivity, reciprocity.
//!
//! [`node_stats::node_stats`] assembles the per-node table with dense ranks;
//! [`rank`], [`descriptives`] and [`edge_types`] derive the remaining views;
//! [`cross_network`] combines the tables of both networks.
//!
//! ```rust,ignore
//! use abgrid_sna::graph::ChoiceGraph;
//! use abgrid_sna::metrics::{network::network_summary, node_stats::node_stats};
//!
//! let g: ChoiceGraph = /* build graph */;
//! let summary = network_summary(&g, 3)?;
//! let table = node_stats(&g, &config)?;
//! ```

pub mod basic;
pub mod betweenness;
pub mod closeness;
pub mod cross_network;
pub mod descriptives;
pub mod edge_types;
pub mod network;
pub mod node_stats;
pub mod pagerank;
pub mod rank;

use serde::Serialize;

/// The five centrality-family metrics that are ranked and summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    InDegreeCentrality,
    PageRank,
    BetweennessCentrality,
    ClosenessCentrality,
    ReachabilityRatio,
}

impl Metric {
    /// All metrics in report order.
    pub const ALL: [Self; 5] = [
        Self::InDegreeCentrality,
        Self::PageRank,
        Self::BetweennessCentrality,
        Self::ClosenessCentrality,
        Self::ReachabilityRatio,
    ];

    /// Short column name used in tables.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::InDegreeCentrality => "ic",
            Self::PageRank => "pr",
            Self::BetweennessCentrality => "bt",
            Self::ClosenessCentrality => "cl",
            Self::ReachabilityRatio => "or",
        }
    }
}

/// Round `value` to `precision` decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let exp = i32::try_from(precision).unwrap_or(i32::MAX);
    let factor = 10_f64.powi(exp);
    if !factor.is_finite() {
        return value;
    }
    (value * factor).round() / factor
}
