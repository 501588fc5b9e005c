//! Views over the node tables of both networks of a group.
//!
//! - [`rankings_ab`] lines up every participant's A and B rank per metric.
//! - [`relevant_nodes`] picks, per metric, the participants whose rank falls
//!   at or below a quantile of all ranks, and weights them by position:
//!
//! ```text
//! weight = 10 / rank^0.8        rank = dense re-rank among the kept nodes
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::metrics::{Metric, descriptives::quantile, node_stats::NodeStatsRow, round_to};

/// One participant's rank in both networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankPair {
    pub label: String,
    pub rank_a: u32,
    pub rank_b: u32,
}

/// A participant standing out on one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantNode {
    pub label: String,
    pub metric: Metric,
    /// Dense rank among the kept participants, 1 = best.
    pub rank: u32,
    pub value: f64,
    pub weight: f64,
}

/// A and B ranks side by side per metric, ordered by the A rank then label.
///
/// Labels missing from `b` are skipped; callers validate the node sets first.
#[must_use]
pub fn rankings_ab(
    a: &BTreeMap<String, NodeStatsRow>,
    b: &BTreeMap<String, NodeStatsRow>,
) -> BTreeMap<Metric, Vec<RankPair>> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let mut pairs: Vec<RankPair> = a
                .iter()
                .filter_map(|(label, row_a)| {
                    b.get(label).map(|row_b| RankPair {
                        label: label.clone(),
                        rank_a: row_a.rank(metric),
                        rank_b: row_b.rank(metric),
                    })
                })
                .collect();
            pairs.sort_by(|x, y| x.rank_a.cmp(&y.rank_a).then_with(|| x.label.cmp(&y.label)));
            (metric, pairs)
        })
        .collect()
}

/// Participants ranked at or below the `threshold` quantile of each metric's
/// ranks, ordered by metric, then re-rank, then label.
#[must_use]
pub fn relevant_nodes(
    rows: &BTreeMap<String, NodeStatsRow>,
    threshold: f64,
    precision: u32,
) -> Vec<RelevantNode> {
    let mut relevant = Vec::new();
    for metric in Metric::ALL {
        let mut ranks: Vec<f64> = rows.values().map(|row| f64::from(row.rank(metric))).collect();
        ranks.sort_by(f64::total_cmp);
        let cutoff = quantile(&ranks, threshold);

        let mut kept: Vec<(&String, &NodeStatsRow)> = rows
            .iter()
            .filter(|(_, row)| f64::from(row.rank(metric)) <= cutoff)
            .collect();
        kept.sort_by(|x, y| x.1.rank(metric).cmp(&y.1.rank(metric)).then_with(|| x.0.cmp(y.0)));

        let mut distinct: Vec<u32> = kept.iter().map(|(_, row)| row.rank(metric)).collect();
        distinct.dedup();

        for (label, row) in kept {
            let position = distinct.partition_point(|&r| r < row.rank(metric));
            let rank = u32::try_from(position + 1).unwrap_or(u32::MAX);
            relevant.push(RelevantNode {
                label: label.clone(),
                metric,
                rank,
                value: row.value(metric),
                weight: round_to(weight(rank), precision),
            });
        }
        debug!(?metric, cutoff, "relevant nodes selected");
    }
    relevant
}

/// Weight of a relevant node at dense position `rank`.
#[must_use]
pub fn weight(rank: u32) -> f64 {
    10.0 / f64::from(rank).powf(0.8)
}
