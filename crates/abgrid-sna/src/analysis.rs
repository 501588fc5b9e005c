//! Group analysis pipeline.
//!
//! ```text
//! GroupChoices
//!     ↓  ChoiceGraph::from_rows()          (A and B)
//!     ↓  validate_nodes()                  fail fast on mismatch
//!     ↓  per network:
//!          network_summary, node_stats, rankings, descriptives,
//!          edge_types (against the other network), components,
//!          compute_layout, render_svg
//!     ↓  rankings_ab, relevant_nodes       across both networks
//! GroupReport
//! ```
//!
//! Every step returns a value; the first failure aborts the group and no
//! partial report is produced. Groups share nothing, so callers may analyse
//! several of them in parallel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::adjacency::PackedRow;
use crate::config::SnaConfig;
use crate::error::SnaError;
use crate::graph::{ChoiceGraph, Components, NetworkKind, components, validate_nodes};
use crate::layout::{Layout, compute_layout};
use crate::metrics::{
    Metric,
    cross_network::{RankPair, RelevantNode, rankings_ab, relevant_nodes},
    descriptives::{Descriptives, describe},
    edge_types::{EdgeTypes, edge_types},
    network::{NetworkSummary, network_summary},
    node_stats::{NodeStatsRow, node_stats},
    rank::rankings,
};
use crate::render::{render_svg, to_data_uri};

/// The two packed choice lists of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChoices {
    pub group: u32,
    pub choices_a: Vec<PackedRow>,
    pub choices_b: Vec<PackedRow>,
}

/// Everything computed for one network of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub kind: NetworkKind,
    pub summary: NetworkSummary,
    /// Node table keyed by label.
    pub nodes: BTreeMap<String, NodeStatsRow>,
    /// `(label, rank)` pairs per metric, best first.
    pub rankings: BTreeMap<Metric, Vec<(String, u32)>>,
    pub descriptives: BTreeMap<Metric, Descriptives>,
    pub edge_types: EdgeTypes,
    pub components: Components,
    pub layout: Layout,
    /// The sociogram as an SVG document.
    #[serde(skip)]
    pub svg: String,
    /// The sociogram as a base64 `data:` URI.
    pub image_uri: String,
}

/// Reports for both networks of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub group: u32,
    pub a: NetworkReport,
    pub b: NetworkReport,
    /// Each participant's A and B rank per metric.
    pub rankings_ab: BTreeMap<Metric, Vec<RankPair>>,
    /// Top-ranked participants of each network.
    pub relevant_nodes: BTreeMap<NetworkKind, Vec<RelevantNode>>,
}

/// Analyse one network; `reference` is the other network of the group.
///
/// # Errors
///
/// Propagates [`SnaError::DegenerateGraph`] and
/// [`SnaError::PageRankNotConverged`] from the metrics and
/// [`SnaError::Render`] from the renderer.
#[instrument(skip(g, reference, config), fields(nodes = g.node_count()))]
pub fn analyze_network(
    g: &ChoiceGraph,
    reference: &ChoiceGraph,
    kind: NetworkKind,
    config: &SnaConfig,
) -> Result<NetworkReport, SnaError> {
    let summary = network_summary(g, config.precision)?;
    let nodes = node_stats(g, config)?;

    let ranked = Metric::ALL
        .iter()
        .map(|&metric| {
            let ranks = nodes
                .iter()
                .map(|(label, row)| (label.as_str(), row.rank(metric)));
            (metric, rankings(ranks))
        })
        .collect();
    let descriptives = describe(&nodes, config.precision);

    let layout = compute_layout(g, &config.layout, kind);
    let svg = render_svg(g, &layout, kind, &config.render)?;
    let image_uri = to_data_uri(&svg);

    Ok(NetworkReport {
        kind,
        summary,
        nodes,
        rankings: ranked,
        descriptives,
        edge_types: edge_types(g, reference),
        components: components(g),
        layout,
        svg,
        image_uri,
    })
}

/// Analyse both networks of a group.
///
/// # Errors
///
/// Returns [`SnaError::NodeMismatch`] before any metric is computed if the
/// networks disagree on participants, otherwise the first error raised by
/// [`analyze_network`].
#[instrument(skip(choices, config), fields(group = choices.group))]
pub fn analyze_group(choices: &GroupChoices, config: &SnaConfig) -> Result<GroupReport, SnaError> {
    let graph_a = ChoiceGraph::from_rows(&choices.choices_a);
    let graph_b = ChoiceGraph::from_rows(&choices.choices_b);
    validate_nodes(&graph_a, &graph_b)?;

    let a = analyze_network(&graph_a, &graph_b, NetworkKind::A, config)?;
    let b = analyze_network(&graph_b, &graph_a, NetworkKind::B, config)?;

    let relevant = [(NetworkKind::A, &a), (NetworkKind::B, &b)]
        .into_iter()
        .map(|(kind, report)| {
            let nodes = relevant_nodes(
                &report.nodes,
                config.relevance_threshold,
                config.precision,
            );
            (kind, nodes)
        })
        .collect();

    info!(
        nodes = graph_a.node_count(),
        edges_a = graph_a.edge_count(),
        edges_b = graph_b.edge_count(),
        "group analysed"
    );

    Ok(GroupReport {
        group: choices.group,
        rankings_ab: rankings_ab(&a.nodes, &b.nodes),
        relevant_nodes: relevant,
        a,
        b,
    })
}
