//! Node-consistency check between the two networks of a group.
//!
//! Both questions are answered by the same participants, so the node sets of
//! network A and network B must be identical. A participant present in only
//! one network means the group file is inconsistent and no statistics can be
//! trusted for that group.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::SnaError;
use crate::graph::build::ChoiceGraph;

/// Return `true` if both graphs have exactly the same node set.
#[must_use]
pub fn check_nodes(a: &ChoiceGraph, b: &ChoiceGraph) -> bool {
    a.node_set() == b.node_set()
}

/// Verify that both graphs have exactly the same node set.
///
/// # Errors
///
/// Returns [`SnaError::NodeMismatch`] listing the labels found on one side
/// only (the symmetric difference, split by side).
pub fn validate_nodes(a: &ChoiceGraph, b: &ChoiceGraph) -> Result<(), SnaError> {
    let nodes_a = a.node_set();
    let nodes_b = b.node_set();

    if nodes_a == nodes_b {
        return Ok(());
    }

    let only_in_a = difference(&nodes_a, &nodes_b);
    let only_in_b = difference(&nodes_b, &nodes_a);
    warn!(?only_in_a, ?only_in_b, "networks A and B disagree on participants");

    Err(SnaError::NodeMismatch {
        only_in_a,
        only_in_b,
    })
}

fn difference(left: &BTreeSet<String>, right: &BTreeSet<String>) -> Vec<String> {
    left.difference(right).cloned().collect()
}
