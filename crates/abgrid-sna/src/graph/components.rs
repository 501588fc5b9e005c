//! Cohesive subgroups: cliques, strongly and weakly connected components.
//!
//! # Overview
//!
//! Only subgroups with more than two members are reported; pairs are already
//! visible as mutual edges in the sociogram. Each subgroup is rendered as
//! the concatenation of its sorted labels (`"ABC"`), and lists are ordered
//! by size descending, then lexicographically.
//!
//! - **Cliques**: maximal cliques of the undirected projection, found with
//!   Bron–Kerbosch with pivoting.
//! - **Strongly connected**: Tarjan SCCs of the directed graph.
//! - **Weakly connected**: connected components ignoring direction.

use fixedbitset::FixedBitSet;
use petgraph::{algo::tarjan_scc, unionfind::UnionFind, visit::EdgeRef};
use serde::Serialize;
use tracing::instrument;

use crate::graph::build::ChoiceGraph;

/// Subgroups with more than two members.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Components {
    pub cliques: Vec<String>,
    pub strongly_connected: Vec<String>,
    pub weakly_connected: Vec<String>,
}

/// Find cliques, strongly and weakly connected components.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn components(g: &ChoiceGraph) -> Components {
    Components {
        cliques: keep_large(g, maximal_cliques(g)),
        strongly_connected: keep_large(g, strongly_connected(g)),
        weakly_connected: keep_large(g, weakly_connected(g)),
    }
}

/// Maximal cliques of the undirected projection, as node index lists.
#[must_use]
pub fn maximal_cliques(g: &ChoiceGraph) -> Vec<Vec<usize>> {
    let n = g.node_count();
    let mut neighbors = vec![FixedBitSet::with_capacity(n); n];
    for e in g.graph.edge_references() {
        let (s, t) = (e.source().index(), e.target().index());
        if s != t {
            neighbors[s].insert(t);
            neighbors[t].insert(s);
        }
    }

    let mut candidates = FixedBitSet::with_capacity(n);
    candidates.insert_range(..);

    let mut cliques = Vec::new();
    bron_kerbosch(
        &mut Vec::new(),
        candidates,
        FixedBitSet::with_capacity(n),
        &neighbors,
        &mut cliques,
    );
    cliques
}

fn bron_kerbosch(
    clique: &mut Vec<usize>,
    mut candidates: FixedBitSet,
    mut excluded: FixedBitSet,
    neighbors: &[FixedBitSet],
    out: &mut Vec<Vec<usize>>,
) {
    if candidates.count_ones(..) == 0 {
        if excluded.count_ones(..) == 0 && !clique.is_empty() {
            out.push(clique.clone());
        }
        return;
    }

    // Pivot on the vertex covering the most candidates.
    let mut pool = candidates.clone();
    pool.union_with(&excluded);
    let pivot = pool.ones().max_by_key(|&u| {
        let mut covered = candidates.clone();
        covered.intersect_with(&neighbors[u]);
        covered.count_ones(..)
    });

    let mut branch = candidates.clone();
    if let Some(u) = pivot {
        branch.difference_with(&neighbors[u]);
    }

    for v in branch.ones().collect::<Vec<_>>() {
        let mut next_candidates = candidates.clone();
        next_candidates.intersect_with(&neighbors[v]);
        let mut next_excluded = excluded.clone();
        next_excluded.intersect_with(&neighbors[v]);

        clique.push(v);
        bron_kerbosch(clique, next_candidates, next_excluded, neighbors, out);
        clique.pop();

        candidates.set(v, false);
        excluded.insert(v);
    }
}

fn strongly_connected(g: &ChoiceGraph) -> Vec<Vec<usize>> {
    tarjan_scc(&g.graph)
        .into_iter()
        .map(|scc| scc.into_iter().map(|idx| idx.index()).collect())
        .collect()
}

fn weakly_connected(g: &ChoiceGraph) -> Vec<Vec<usize>> {
    let n = g.node_count();
    let mut sets = UnionFind::<usize>::new(n);
    for e in g.graph.edge_references() {
        sets.union(e.source().index(), e.target().index());
    }

    let labels = sets.into_labeling();
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (node, root) in labels.into_iter().enumerate() {
        groups[root].push(node);
    }
    groups.retain(|group| !group.is_empty());
    groups
}

/// Keep groups with more than two members, as sorted label strings.
fn keep_large(g: &ChoiceGraph, groups: Vec<Vec<usize>>) -> Vec<String> {
    let mut named: Vec<String> = groups
        .into_iter()
        .filter(|group| group.len() > 2)
        .map(|group| {
            let mut labels: Vec<&str> = group
                .into_iter()
                .map(|i| g.label(petgraph::graph::NodeIndex::new(i)))
                .collect();
            labels.sort_unstable();
            labels.concat()
        })
        .collect();
    named.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    named
}
