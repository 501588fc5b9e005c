//! Packed adjacency rows and their expansion into edge lists.
//!
//! # Overview
//!
//! Group files list each participant's choices as a single row mapping one
//! label to a comma-joined list of chosen labels:
//!
//! ```text
//! A: B,C      →  (A, B), (A, C)
//! B: A        →  (B, A)
//! C: ~        →  (no edges, C is still a participant)
//! ```
//!
//! Rows are assumed to be well formed (single uppercase labels, no empty
//! entries); that is checked when the group file is parsed, not here.

use serde::{Deserialize, Serialize};

/// A directed choice `(source, target)`.
pub type Edge = (String, String);

/// One participant's packed choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedRow {
    /// The choosing participant.
    pub source: String,
    /// Comma-joined chosen participants, or `None` if nobody was chosen.
    pub targets: Option<String>,
}

impl PackedRow {
    /// Build a row with a non-empty choice list.
    #[must_use]
    pub fn new(source: impl Into<String>, targets: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            targets: Some(targets.into()),
        }
    }

    /// Build a row for a participant who chose nobody.
    #[must_use]
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            targets: None,
        }
    }

    /// Iterate over the chosen labels in their written order.
    pub fn target_labels(&self) -> impl Iterator<Item = &str> {
        self.targets
            .as_deref()
            .filter(|t| !t.is_empty())
            .into_iter()
            .flat_map(|t| t.split(','))
    }
}

/// Flatten packed rows into an ordered edge list.
///
/// Row order and within-row order are preserved. Duplicates are kept here;
/// they collapse when the graph is built.
#[must_use]
pub fn unpack_edges(rows: &[PackedRow]) -> Vec<Edge> {
    rows.iter()
        .flat_map(|row| {
            row.target_labels()
                .map(move |target| (row.source.clone(), target.to_string()))
        })
        .collect()
}

/// Source labels of all rows, in row order, without repeats.
#[must_use]
pub fn source_labels(rows: &[PackedRow]) -> Vec<String> {
    let mut seen = Vec::with_capacity(rows.len());
    for row in rows {
        if !seen.contains(&row.source) {
            seen.push(row.source.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> Edge {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn unpack_preserves_row_and_split_order() {
        let rows = vec![PackedRow::new("A", "C,B"), PackedRow::new("B", "A")];
        assert_eq!(
            unpack_edges(&rows),
            vec![pair("A", "C"), pair("A", "B"), pair("B", "A")]
        );
    }

    #[test]
    fn empty_rows_produce_no_edges() {
        let rows = vec![
            PackedRow::empty("A"),
            PackedRow::new("B", ""),
            PackedRow::new("C", "A"),
        ];
        assert_eq!(unpack_edges(&rows), vec![pair("C", "A")]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(unpack_edges(&[]).is_empty());
        assert!(source_labels(&[]).is_empty());
    }

    #[test]
    fn source_labels_dedupes_in_order() {
        let rows = vec![
            PackedRow::new("C", "A"),
            PackedRow::new("A", "C"),
            PackedRow::new("C", "B"),
        ];
        assert_eq!(source_labels(&rows), vec!["C", "A"]);
    }
}
