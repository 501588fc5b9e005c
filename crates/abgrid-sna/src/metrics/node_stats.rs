//! Per-node statistics table.
//!
//! Combines the five centrality-family metrics, the degree status and the
//! display links of every participant into one [`NodeStatsRow`]. Values are
//! rounded to the configured precision first and ranked afterwards, so two
//! participants that print the same value always share a rank.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SnaConfig;
use crate::error::SnaError;
use crate::graph::build::ChoiceGraph;
use crate::metrics::{
    Metric,
    basic::{DegreeStatus, degree_status, in_degree_centrality, links, reachability_ratio},
    betweenness::betweenness_centrality,
    closeness::closeness_centrality,
    pagerank::pagerank,
    rank::dense_rank,
    round_to,
};

/// One participant's row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStatsRow {
    /// Chosen participants, sorted and joined (`"B, C"`).
    pub links: String,
    pub in_degree_centrality: f64,
    pub pagerank: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub reachability_ratio: f64,
    pub has_no_indegree: bool,
    pub degree_status: DegreeStatus,
    pub in_degree_centrality_rank: u32,
    pub pagerank_rank: u32,
    pub betweenness_centrality_rank: u32,
    pub closeness_centrality_rank: u32,
    pub reachability_ratio_rank: u32,
}

impl NodeStatsRow {
    /// Value of the given metric.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::InDegreeCentrality => self.in_degree_centrality,
            Metric::PageRank => self.pagerank,
            Metric::BetweennessCentrality => self.betweenness_centrality,
            Metric::ClosenessCentrality => self.closeness_centrality,
            Metric::ReachabilityRatio => self.reachability_ratio,
        }
    }

    /// Dense rank of the given metric.
    #[must_use]
    pub const fn rank(&self, metric: Metric) -> u32 {
        match metric {
            Metric::InDegreeCentrality => self.in_degree_centrality_rank,
            Metric::PageRank => self.pagerank_rank,
            Metric::BetweennessCentrality => self.betweenness_centrality_rank,
            Metric::ClosenessCentrality => self.closeness_centrality_rank,
            Metric::ReachabilityRatio => self.reachability_ratio_rank,
        }
    }
}

/// Rounded metric values keyed by metric, then by label.
type MetricTable = BTreeMap<Metric, HashMap<String, f64>>;

/// Compute the node table for one network, keyed by label.
///
/// # Errors
///
/// Returns [`SnaError::DegenerateGraph`] for a single-node graph and
/// [`SnaError::PageRankNotConverged`] if PageRank hits its iteration cap.
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn node_stats(
    g: &ChoiceGraph,
    config: &SnaConfig,
) -> Result<BTreeMap<String, NodeStatsRow>, SnaError> {
    let precision = config.precision;
    let rounded = |values: HashMap<String, f64>| -> HashMap<String, f64> {
        values
            .into_iter()
            .map(|(label, v)| (label, round_to(v, precision)))
            .collect()
    };

    let mut table: MetricTable = BTreeMap::new();
    table.insert(Metric::InDegreeCentrality, rounded(in_degree_centrality(g)?));
    table.insert(Metric::PageRank, rounded(pagerank(g, &config.pagerank)?));
    table.insert(Metric::BetweennessCentrality, rounded(betweenness_centrality(g)));
    table.insert(Metric::ClosenessCentrality, rounded(closeness_centrality(g)));
    table.insert(Metric::ReachabilityRatio, rounded(reachability_ratio(g)));

    let ranks: BTreeMap<Metric, HashMap<String, u32>> = table
        .iter()
        .map(|(metric, values)| (*metric, dense_rank(values)))
        .collect();

    let statuses = degree_status(g);
    let link_map = links(g);

    let value = |metric: Metric, label: &str| -> f64 {
        table
            .get(&metric)
            .and_then(|m| m.get(label))
            .copied()
            .unwrap_or(0.0)
    };
    let rank = |metric: Metric, label: &str| -> u32 {
        ranks
            .get(&metric)
            .and_then(|m| m.get(label))
            .copied()
            .unwrap_or(0)
    };

    let rows: BTreeMap<String, NodeStatsRow> = g
        .graph
        .node_weights()
        .map(|label| {
            let status = statuses
                .get(label)
                .copied()
                .unwrap_or(DegreeStatus::Isolated);
            let row = NodeStatsRow {
                links: link_map.get(label).cloned().unwrap_or_default(),
                in_degree_centrality: value(Metric::InDegreeCentrality, label),
                pagerank: value(Metric::PageRank, label),
                betweenness_centrality: value(Metric::BetweennessCentrality, label),
                closeness_centrality: value(Metric::ClosenessCentrality, label),
                reachability_ratio: value(Metric::ReachabilityRatio, label),
                has_no_indegree: status.has_no_indegree(),
                degree_status: status,
                in_degree_centrality_rank: rank(Metric::InDegreeCentrality, label),
                pagerank_rank: rank(Metric::PageRank, label),
                betweenness_centrality_rank: rank(Metric::BetweennessCentrality, label),
                closeness_centrality_rank: rank(Metric::ClosenessCentrality, label),
                reachability_ratio_rank: rank(Metric::ReachabilityRatio, label),
            };
            (label.clone(), row)
        })
        .collect();

    debug!(rows = rows.len(), "node table computed");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::graph_from_edge_list;

    #[test]
    fn star_table() {
        let g = graph_from_edge_list(&[("A", "B"), ("A", "C")]);
        let rows = node_stats(&g, &SnaConfig::default()).expect("n = 3");

        assert_eq!(rows.len(), 3);
        assert!((rows["A"].in_degree_centrality - 0.0).abs() < 1e-12);
        assert!((rows["B"].in_degree_centrality - 0.5).abs() < 1e-12);
        assert!((rows["C"].in_degree_centrality - 0.5).abs() < 1e-12);
        assert!(rows["A"].has_no_indegree);
        assert!(!rows["B"].has_no_indegree);
        assert_eq!(rows["A"].links, "B, C");

        // A reaches everybody; B and C reach nobody.
        assert_eq!(rows["A"].reachability_ratio_rank, 1);
        assert_eq!(rows["B"].reachability_ratio_rank, 2);
        assert_eq!(rows["B"].in_degree_centrality_rank, 1);
        assert_eq!(rows["C"].in_degree_centrality_rank, 1);
        assert_eq!(rows["A"].in_degree_centrality_rank, 2);
    }

    #[test]
    fn values_are_rounded() {
        // A → B → C → D: betweenness 1/3 rounds to 0.333.
        let g = graph_from_edge_list(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let rows = node_stats(&g, &SnaConfig::default()).expect("n = 4");
        assert!((rows["B"].betweenness_centrality - 0.333).abs() < 1e-12);
        assert!((rows["B"].value(Metric::ReachabilityRatio) - 0.667).abs() < 1e-12);
        assert_eq!(rows["B"].rank(Metric::BetweennessCentrality), 1);
        assert_eq!(rows["C"].rank(Metric::BetweennessCentrality), 1);
        assert_eq!(rows["A"].rank(Metric::BetweennessCentrality), 2);
    }

    #[test]
    fn single_node_is_degenerate() {
        let g = ChoiceGraph::from_rows(&[crate::adjacency::PackedRow::empty("A")]);
        assert!(matches!(
            node_stats(&g, &SnaConfig::default()),
            Err(SnaError::DegenerateGraph { .. })
        ));
    }
}
