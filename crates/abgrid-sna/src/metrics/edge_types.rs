//! Edge typology of a network relative to its companion network.
//!
//! With `X` the network being described and `Y` the other network of the
//! same group:
//!
//! | Type | Relation                                              | Listed as  |
//! |------|-------------------------------------------------------|------------|
//! | I    | `u → v` in X, `v → u` absent in X                     | `(u, v)`   |
//! | II   | `u ↔ v` in X                                          | `u < v`    |
//! | III  | same direction in X and Y, not type V                 | `u < v`    |
//! | IV   | `u → v` in X and `v → u` in Y, not type V             | `u < v`    |
//! | V    | `u ↔ v` in X and `u ↔ v` in Y                         | `u < v`    |
//!
//! Both graphs must hold the same participants; run the node validator
//! first.

use serde::Serialize;
use tracing::instrument;

use crate::graph::build::ChoiceGraph;

/// A labeled pair.
pub type LabelPair = (String, String);

/// Edges of one network by type, each list sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EdgeTypes {
    pub type_i: Vec<LabelPair>,
    pub type_ii: Vec<LabelPair>,
    pub type_iii: Vec<LabelPair>,
    pub type_iv: Vec<LabelPair>,
    pub type_v: Vec<LabelPair>,
}

/// Classify the edges of `x` against `reference`.
#[must_use]
#[instrument(skip(x, reference), fields(edges = x.edge_count()))]
pub fn edge_types(x: &ChoiceGraph, reference: &ChoiceGraph) -> EdgeTypes {
    let mut types = EdgeTypes::default();

    for (u, v) in x.edges() {
        if u == v {
            continue;
        }
        if !x.contains_edge(v, u) {
            types.type_i.push((u.to_string(), v.to_string()));
        }
    }

    let labels = x.sorted_labels();
    for (i, &u) in labels.iter().enumerate() {
        for &v in &labels[i + 1..] {
            let pair = || (u.to_string(), v.to_string());

            let mutual_x = x.is_mutual(u, v);
            let mutual_y = reference.is_mutual(u, v);
            if mutual_x {
                types.type_ii.push(pair());
            }
            if mutual_x && mutual_y {
                types.type_v.push(pair());
                continue;
            }

            let same = (x.contains_edge(u, v) && reference.contains_edge(u, v))
                || (x.contains_edge(v, u) && reference.contains_edge(v, u));
            if same {
                types.type_iii.push(pair());
            }

            let reversed = (x.contains_edge(u, v) && reference.contains_edge(v, u))
                || (x.contains_edge(v, u) && reference.contains_edge(u, v));
            if reversed {
                types.type_iv.push(pair());
            }
        }
    }

    types.type_i.sort_unstable();
    types
}
